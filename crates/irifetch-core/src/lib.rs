//! Secure retrieval of remote model data files and tar archives.
//!
//! `irifetch-core` downloads a resource into a target directory and, if the
//! payload is a tar archive, unpacks it there. Every archive member is
//! validated before anything is written: links, devices and special files
//! are refused, as are absolute names and names that resolve outside the
//! target directory. A single unsafe member aborts the whole extraction.
//!
//! # Examples
//!
//! ```no_run
//! use irifetch_core::retrieve;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Archive: extracted into ./iri2016/source, staged tar removed
//! let report = retrieve("https://irimodel.org/IRI-2016", "00_iri.tar", "iri2016/source")?;
//! println!("extracted {} files", report.extraction.map_or(0, |e| e.files_extracted));
//!
//! // Plain file: stored as fetched
//! retrieve(
//!     "https://chain-new.chain-project.net/echaim_downloads",
//!     "apf107.dat",
//!     "iri2016/data/index",
//! )?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod catalog;
pub mod cleanup;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod formats;
pub mod io;
pub mod report;
pub mod security;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::Inspection;
pub use api::Retriever;
pub use api::inspect;
pub use api::retrieve;
pub use config::ExtractionPolicy;
pub use config::FetchConfig;
pub use error::NetworkError;
pub use error::Result;
pub use error::RetrieveError;
pub use error::SecurityRule;
pub use report::ExtractionReport;
pub use report::FetchProgress;
pub use report::NoopProgress;
pub use report::RetrieveReport;
pub use report::RetrieveStatus;

// Re-export types module for easier access
pub use types::ArchiveMember;
pub use types::MemberKind;
pub use types::ResourceLocator;
pub use types::TargetDir;
