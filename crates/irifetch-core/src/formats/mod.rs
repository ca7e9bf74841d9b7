//! Archive format detection and reading.

pub mod detect;
pub mod tar;
pub mod traits;

// Re-export main types for convenience
pub use detect::is_archive;
pub use tar::TarArchive;
pub use traits::ArchiveFormat;
