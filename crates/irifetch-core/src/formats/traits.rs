//! Common trait for archive format readers.

use std::io::Read;
use std::path::Path;

use crate::Result;
use crate::types::ArchiveMember;

/// Read access to an archive's members, in stored order.
///
/// Implementations must yield the same members in the same order on every
/// call, so that a listing pass and a later extraction pass agree.
pub trait ArchiveFormat {
    /// Calls `visit` for every member with a reader over its contents.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by reading the archive or by
    /// `visit`.
    fn visit_entries(
        &self,
        visit: &mut dyn FnMut(ArchiveMember, &mut dyn Read) -> Result<()>,
    ) -> Result<()>;

    /// Returns the location of the archive.
    fn path(&self) -> &Path;

    /// Lists every member without reading contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read.
    fn members(&self) -> Result<Vec<ArchiveMember>> {
        let mut members = Vec::new();
        self.visit_entries(&mut |member, _| {
            members.push(member);
            Ok(())
        })?;
        Ok(members)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::MemberKind;
    use std::path::PathBuf;

    struct Fixed {
        path: PathBuf,
        entries: Vec<(ArchiveMember, &'static [u8])>,
    }

    impl ArchiveFormat for Fixed {
        fn visit_entries(
            &self,
            visit: &mut dyn FnMut(ArchiveMember, &mut dyn Read) -> Result<()>,
        ) -> Result<()> {
            for (member, mut data) in self.entries.iter().cloned() {
                visit(member, &mut data)?;
            }
            Ok(())
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    #[test]
    fn test_default_members_listing() {
        let archive = Fixed {
            path: PathBuf::from("fixed"),
            entries: vec![
                (ArchiveMember::new("a", MemberKind::Directory, 0), b"".as_slice()),
                (ArchiveMember::new("a/b.dat", MemberKind::Regular, 3), b"abc".as_slice()),
            ],
        };
        let members = archive.members().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].name, PathBuf::from("a/b.dat"));
    }
}
