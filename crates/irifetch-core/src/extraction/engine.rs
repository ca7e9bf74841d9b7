//! Extraction engine.

use std::fs::File;
use std::fs::create_dir_all;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::ExtractionReport;
use crate::Result;
use crate::RetrieveError;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::formats::ArchiveFormat;
use crate::security::ValidatedMember;
use crate::security::ValidatedMembers;
#[cfg(unix)]
use crate::security::sanitize_mode;
use crate::types::ArchiveMember;
use crate::types::MemberKind;
use crate::types::TargetDir;

/// Writes validated archive members into a target directory.
///
/// The extractor never decides whether a member is safe. It only accepts a
/// [`ValidatedMembers`] list produced by
/// [`MemberValidator`](crate::security::MemberValidator) for the same
/// archive, and re-reads the archive pairing every entry with its validated
/// counterpart by position.
pub struct Extractor<'a> {
    target: &'a TargetDir,
    buffer: CopyBuffer,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor writing into `target`.
    #[must_use]
    pub fn new(target: &'a TargetDir) -> Self {
        Self {
            target,
            buffer: CopyBuffer::new(),
        }
    }

    /// Extracts every validated member of `archive`.
    ///
    /// Directories are created (the target itself is skipped), regular files
    /// are written with their parents created as needed. Existing files are
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Extraction` if the archive cannot be read, if
    /// its entries no longer match the validated list, or if writing a member
    /// fails. Members written before the failure are left in place.
    pub fn extract(
        &mut self,
        archive: &dyn ArchiveFormat,
        validated: &ValidatedMembers,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let target = self.target;
        let buffer = &mut self.buffer;
        let archive_path = archive.path();

        let mut report = ExtractionReport::new();
        let mut remaining = validated.iter();

        archive.visit_entries(&mut |member, reader| {
            let Some(expected) = remaining.next() else {
                return Err(listing_mismatch(archive_path, &member));
            };
            if expected.member.name != member.name || expected.member.kind != member.kind {
                return Err(listing_mismatch(archive_path, &member));
            }
            write_member(expected, reader, target, archive_path, buffer, &mut report)
        })?;

        if let Some(missing) = remaining.next() {
            return Err(listing_mismatch(archive_path, &missing.member));
        }

        report.duration = start.elapsed();
        info!(
            archive = %archive_path.display(),
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "extracted archive"
        );
        Ok(report)
    }
}

fn write_member(
    validated: &ValidatedMember,
    reader: &mut dyn Read,
    target: &TargetDir,
    archive_path: &Path,
    buffer: &mut CopyBuffer,
    report: &mut ExtractionReport,
) -> Result<()> {
    let dest = target.join(&validated.path);

    match validated.member.kind {
        MemberKind::Directory => {
            if validated.path.is_root() {
                return Ok(());
            }
            create_dir_all(&dest).map_err(|e| RetrieveError::extraction(&dest, e))?;
            debug!(path = %dest.display(), "created directory");
            report.directories_created += 1;
        }
        MemberKind::Regular => {
            if let Some(parent) = dest.parent() {
                create_dir_all(parent).map_err(|e| RetrieveError::extraction(parent, e))?;
            }

            let file = File::create(&dest).map_err(|e| RetrieveError::extraction(&dest, e))?;
            let mut writer = BufWriter::with_capacity(64 * 1024, file);
            let written = copy_with_buffer(reader, &mut writer, buffer).map_err(|e| match e {
                CopyError::Read(e) => RetrieveError::extraction(archive_path, e),
                CopyError::Write(e) => RetrieveError::extraction(&dest, e),
            })?;
            drop(writer);

            #[cfg(unix)]
            if let Some(mode) = validated.member.mode {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(sanitize_mode(mode));
                std::fs::set_permissions(&dest, permissions)
                    .map_err(|e| RetrieveError::extraction(&dest, e))?;
            }

            debug!(path = %dest.display(), bytes = written, "wrote file");
            report.files_extracted += 1;
            report.bytes_written = report.bytes_written.saturating_add(written);
        }
        // Unreachable for validated members; refuse rather than guess.
        MemberKind::Symlink | MemberKind::Hardlink | MemberKind::Device | MemberKind::Other => {
            return Err(listing_mismatch(archive_path, &validated.member));
        }
    }

    report.written_paths.push(dest);
    Ok(())
}

fn listing_mismatch(archive_path: &Path, member: &ArchiveMember) -> RetrieveError {
    RetrieveError::extraction(
        archive_path,
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "archive entry {} does not match the validated member list",
                member.name.display()
            ),
        ),
    )
}
