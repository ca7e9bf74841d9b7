//! Tar archive reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::RetrieveError;
use crate::types::ArchiveMember;
use crate::types::MemberKind;

use super::traits::ArchiveFormat;

/// Uncompressed tar archive on disk.
///
/// Every pass reopens the file, so listing and extraction each read the
/// archive from the start.
#[derive(Debug, Clone)]
pub struct TarArchive {
    path: PathBuf,
}

impl TarArchive {
    /// Creates a reader for the archive at `path`. No I/O happens here.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_error(&self, e: std::io::Error) -> RetrieveError {
        RetrieveError::extraction(&self.path, e)
    }
}

impl ArchiveFormat for TarArchive {
    fn visit_entries(
        &self,
        visit: &mut dyn FnMut(ArchiveMember, &mut dyn Read) -> Result<()>,
    ) -> Result<()> {
        let file = File::open(&self.path).map_err(|e| self.read_error(e))?;
        let mut archive = tar::Archive::new(file);

        for entry in archive.entries().map_err(|e| self.read_error(e))? {
            let mut entry = entry.map_err(|e| self.read_error(e))?;

            let header = entry.header();
            // Pax global headers describe the archive, not a member.
            let Some(kind) = MemberKind::from_tar(header.entry_type()) else {
                continue;
            };
            let size = header.size().map_err(|e| self.read_error(e))?;
            let mode = header.mode().ok();
            let name = entry.path().map_err(|e| self.read_error(e))?.into_owned();

            let member = ArchiveMember {
                name,
                kind,
                size,
                mode,
            };
            visit(member, &mut entry)?;
        }

        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
