//! File permission sanitization.

/// Permission bits that are carried over from the archive.
const PERMISSION_MASK: u32 = 0o777;

/// Strips setuid, setgid, sticky and file-type bits from an archive mode.
///
/// # Examples
///
/// ```
/// use irifetch_core::security::sanitize_mode;
///
/// assert_eq!(sanitize_mode(0o100_644), 0o644);
/// assert_eq!(sanitize_mode(0o4755), 0o755);
/// ```
#[must_use]
pub const fn sanitize_mode(mode: u32) -> u32 {
    mode & PERMISSION_MASK
}
