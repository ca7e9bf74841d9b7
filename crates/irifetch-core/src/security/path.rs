//! Path containment validation.

use std::path::Path;

use crate::Result;
use crate::types::ContainedPath;
use crate::types::TargetDir;

/// Validates that a member name resolves inside the target directory.
///
/// This function delegates to `ContainedPath::resolve()` which performs:
/// - Empty name rejection
/// - Absolute path rejection
/// - `.`/`..` folding with traversal detection
/// - Component-wise containment against the canonical target
/// - Canonicalization of the deepest existing ancestor
///
/// # Errors
///
/// Returns `RetrieveError::PathSecurity` naming the violated rule.
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::security::validate_path;
/// use irifetch_core::types::TargetDir;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::open("/tmp")?;
///
/// let path = validate_path(Path::new("data/igrf/igrf12.dat"), &target)?;
///
/// assert!(validate_path(Path::new("../etc/passwd"), &target).is_err());
/// # Ok(())
/// # }
/// ```
pub fn validate_path(name: &Path, target: &TargetDir) -> Result<ContainedPath> {
    ContainedPath::resolve(name, target)
}
