//! Archive detection by structural signature.
//!
//! Remote file names are untrusted, so classification never looks at the
//! name or extension: only the first header block decides.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Result;
use crate::RetrieveError;

/// Size of a tar header block.
pub const BLOCK_SIZE: usize = 512;

/// Offset of the `ustar` magic inside a header block.
const MAGIC_OFFSET: usize = 257;

/// POSIX and GNU headers both start their magic with these bytes.
const USTAR_MAGIC: &[u8; 5] = b"ustar";

/// Location of the header checksum field.
const CHECKSUM_START: usize = 148;
const CHECKSUM_END: usize = 156;

/// Returns `true` if the file at `path` is a tar archive.
///
/// Files shorter than one header block are never archives.
///
/// # Errors
///
/// Returns `RetrieveError::Extraction` if the file cannot be read.
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::formats::detect::is_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// if is_archive("/tmp/iri-data/00_iri.tar".as_ref())? {
///     println!("looks like a tar archive");
/// }
/// # Ok(())
/// # }
/// ```
pub fn is_archive(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(|e| RetrieveError::extraction(path, e))?;
    let mut block = Vec::with_capacity(BLOCK_SIZE);
    file.take(BLOCK_SIZE as u64)
        .read_to_end(&mut block)
        .map_err(|e| RetrieveError::extraction(path, e))?;

    Ok(is_tar_header(&block))
}

/// Returns `true` if `block` is a plausible tar header.
///
/// The stored checksum must match the block contents, and the block must
/// either carry the `ustar` magic or (for pre-POSIX headers) a name.
#[must_use]
pub fn is_tar_header(block: &[u8]) -> bool {
    if block.len() < BLOCK_SIZE {
        return false;
    }

    let has_magic = &block[MAGIC_OFFSET..MAGIC_OFFSET + USTAR_MAGIC.len()] == USTAR_MAGIC;
    let has_name = block[0] != 0;

    (has_magic || has_name) && checksum_matches(block)
}

fn checksum_matches(block: &[u8]) -> bool {
    let Some(stored) = parse_octal(&block[CHECKSUM_START..CHECKSUM_END]) else {
        return false;
    };

    // The checksum field itself counts as eight spaces.
    let mut unsigned: u64 = 8 * u64::from(b' ');
    let mut signed: i64 = 8 * i64::from(b' ');
    for (i, &byte) in block[..BLOCK_SIZE].iter().enumerate() {
        if (CHECKSUM_START..CHECKSUM_END).contains(&i) {
            continue;
        }
        unsigned += u64::from(byte);
        #[allow(clippy::cast_possible_wrap)]
        let byte_signed = byte as i8;
        signed += i64::from(byte_signed);
    }

    #[allow(clippy::cast_possible_wrap)]
    let stored_signed = stored as i64;
    stored == unsigned || stored_signed == signed
}

/// Parses a NUL/space padded octal number.
fn parse_octal(field: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(field).ok()?;
    let digits = text.trim_matches(|c: char| c == '\0' || c == ' ');
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 8).ok()
}
