//! Archive member description.

use std::path::PathBuf;

/// Kind of entry in an archive.
///
/// This is a closed set: every tar entry type maps onto exactly one variant,
/// and the validator matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Regular file entry.
    Regular,
    /// Directory entry.
    Directory,
    /// Symbolic link entry.
    Symlink,
    /// Hard link entry.
    Hardlink,
    /// Character device, block device or FIFO.
    Device,
    /// Anything else (sparse files, vendor extensions).
    Other,
}

impl MemberKind {
    /// Maps a tar header entry type onto a member kind.
    ///
    /// Returns `None` for pax global headers, which carry archive metadata
    /// rather than a member.
    #[must_use]
    pub fn from_tar(entry_type: tar::EntryType) -> Option<Self> {
        if entry_type.is_pax_global_extensions() {
            return None;
        }
        let kind = if entry_type.is_file() || entry_type.is_contiguous() {
            Self::Regular
        } else if entry_type.is_dir() {
            Self::Directory
        } else if entry_type.is_symlink() {
            Self::Symlink
        } else if entry_type.is_hard_link() {
            Self::Hardlink
        } else if entry_type.is_character_special()
            || entry_type.is_block_special()
            || entry_type.is_fifo()
        {
            Self::Device
        } else {
            Self::Other
        };
        Some(kind)
    }

    /// Returns `true` if members of this kind may be written to disk.
    #[must_use]
    pub const fn is_extractable(self) -> bool {
        match self {
            Self::Regular | Self::Directory => true,
            Self::Symlink | Self::Hardlink | Self::Device | Self::Other => false,
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Regular => "regular file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Hardlink => "hardlink",
            Self::Device => "device",
            Self::Other => "special",
        };
        f.write_str(name)
    }
}

/// Read-only description of one archive entry, as listed from the header.
///
/// The name has NOT been validated and must be checked before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Entry name exactly as stored in the archive.
    pub name: PathBuf,
    /// Entry kind.
    pub kind: MemberKind,
    /// Declared size in bytes.
    pub size: u64,
    /// Permission bits, if the archive encodes them.
    pub mode: Option<u32>,
}

impl ArchiveMember {
    /// Creates a member description.
    pub fn new(name: impl Into<PathBuf>, kind: MemberKind, size: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            size,
            mode: None,
        }
    }
}
