//! Type-safe wrappers for retrieval and extraction.
//!
//! Security-relevant types are validated upon construction and cannot be
//! created from raw types without going through validation:
//!
//! - [`TargetDir`] is always a canonical, existing directory
//! - [`ContainedPath`] is always a relative path that resolves inside a
//!   [`TargetDir`]
//! - [`ResourceLocator`] always names a single plain file

pub mod contained_path;
pub mod locator;
pub mod member;
pub mod staged;
pub mod target_dir;

pub use contained_path::ContainedPath;
pub use locator::ResourceLocator;
pub use member::ArchiveMember;
pub use member::MemberKind;
pub use staged::StagedArtifact;
pub use target_dir::TargetDir;
