//! Removal of staged artifacts after a successful extraction.

use tracing::debug;

use crate::Result;
use crate::RetrieveError;
use crate::types::StagedArtifact;

/// Deletes a staged archive whose members have all been extracted.
///
/// Consumes the handle so the artifact cannot be reused afterwards. Callers
/// only reach this on success; on any earlier failure the artifact is left
/// on disk for inspection.
///
/// # Errors
///
/// Returns `RetrieveError::Extraction` if the file cannot be removed.
pub fn remove_staged(artifact: StagedArtifact) -> Result<()> {
    let path = artifact.into_path();
    std::fs::remove_file(&path).map_err(|e| RetrieveError::extraction(&path, e))?;
    debug!(path = %path.display(), "removed staged archive");
    Ok(())
}
