//! Staged artifact handle.

use std::path::Path;
use std::path::PathBuf;

use super::ResourceLocator;

/// A downloaded file that has not yet been inspected, extracted or accepted.
///
/// The handle is not `Clone`: it is owned by one retrieval and is consumed by
/// [`remove_staged`](crate::cleanup::remove_staged) on success. Dropping it
/// leaves the file on disk.
#[derive(Debug, PartialEq, Eq)]
pub struct StagedArtifact {
    local_path: PathBuf,
    source: ResourceLocator,
    bytes: u64,
}

impl StagedArtifact {
    pub(crate) fn new(local_path: PathBuf, source: ResourceLocator, bytes: u64) -> Self {
        Self {
            local_path,
            source,
            bytes,
        }
    }

    /// Returns where the artifact was written.
    #[must_use]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Returns the locator it was fetched from.
    #[must_use]
    pub fn source(&self) -> &ResourceLocator {
        &self.source
    }

    /// Returns the number of bytes received.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Gives up the handle and returns the path, leaving the file in place.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.local_path
    }
}
