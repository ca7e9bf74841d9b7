//! Retrieval and extraction reporting.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::ResourceLocator;

/// Report of a completed extraction.
///
/// Only produced after every member of the archive passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Absolute paths of every file and directory written, in archive order.
    pub written_paths: Vec<PathBuf>,

    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directories created.
    pub directories_created: usize,

    /// Total file bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries materialized.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// What the orchestrator did with a fetched artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieveStatus {
    /// The payload was not an archive and was kept as fetched.
    Stored,
    /// The payload was an archive; its members were extracted and the
    /// staged archive removed.
    Extracted,
}

impl std::fmt::Display for RetrieveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stored => f.write_str("stored"),
            Self::Extracted => f.write_str("extracted"),
        }
    }
}

/// Report of a whole `retrieve` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveReport {
    /// URL that was fetched.
    pub url: String,

    /// Outcome.
    pub status: RetrieveStatus,

    /// Paths that now hold the result: the stored file, or every extracted
    /// entry.
    pub written_paths: Vec<PathBuf>,

    /// Bytes received from the network.
    pub bytes_fetched: u64,

    /// Extraction details, for archive payloads.
    pub extraction: Option<ExtractionReport>,

    /// Duration of the whole operation.
    pub duration: Duration,
}

impl RetrieveReport {
    /// Returns `true` if the payload was unpacked.
    #[must_use]
    pub fn was_extracted(&self) -> bool {
        self.status == RetrieveStatus::Extracted
    }
}

/// Callback trait for download progress.
///
/// # Examples
///
/// ```
/// use irifetch_core::FetchProgress;
/// use irifetch_core::types::ResourceLocator;
///
/// struct Printer(u64);
///
/// impl FetchProgress for Printer {
///     fn on_start(&mut self, locator: &ResourceLocator, total: Option<u64>) {
///         println!("fetching {locator} ({total:?} bytes)");
///     }
///
///     fn on_bytes(&mut self, bytes: u64) {
///         self.0 += bytes;
///     }
///
///     fn on_complete(&mut self) {
///         println!("received {} bytes", self.0);
///     }
/// }
/// ```
pub trait FetchProgress: Send {
    /// Called once the response headers arrived.
    ///
    /// `total` is the advertised content length, if any.
    fn on_start(&mut self, locator: &ResourceLocator, total: Option<u64>);

    /// Called for every chunk written to the staging file.
    fn on_bytes(&mut self, bytes: u64);

    /// Called after the body has been fully written.
    fn on_complete(&mut self);
}

/// No-op implementation of `FetchProgress`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl FetchProgress for NoopProgress {
    fn on_start(&mut self, _locator: &ResourceLocator, _total: Option<u64>) {}

    fn on_bytes(&mut self, _bytes: u64) {}

    fn on_complete(&mut self) {}
}
