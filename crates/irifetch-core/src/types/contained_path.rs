//! Validated contained path type.

use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::RetrieveError;
use crate::SecurityRule;

use super::TargetDir;

/// A relative path that resolves inside a [`TargetDir`].
///
/// `ContainedPath` holds the lexically normalized form of an archive member
/// name: no `.` or `..` segments, no root, no prefix. It is empty when the
/// name resolves to the target directory itself.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`ContainedPath::resolve`]
/// - NO `From<PathBuf>` implementation
/// - Containment is decided by path components, never by string prefix
/// - Existing ancestors on disk are canonicalized, so a symlink already
///   present under the target cannot redirect a write outside of it
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::types::ContainedPath;
/// use irifetch_core::types::TargetDir;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::open("/tmp")?;
///
/// let path = ContainedPath::resolve(Path::new("source/./irisub.for"), &target)?;
/// assert_eq!(path.as_path(), Path::new("source/irisub.for"));
///
/// assert!(ContainedPath::resolve(Path::new("../../evil.txt"), &target).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainedPath(PathBuf);

impl ContainedPath {
    /// Resolves `name` against `target` and checks containment.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject empty names
    /// 2. Reject absolute names (root or platform prefix)
    /// 3. Fold `.` and `..` segments; popping above the target is a traversal
    /// 4. Verify the candidate is the target or a descendant, by components
    /// 5. Canonicalize the deepest existing ancestor of the candidate and
    ///    verify it is still inside the target
    ///
    /// # Errors
    ///
    /// - `PathSecurity` with `Degenerate`, `AbsolutePath` or `Traversal`
    /// - `Extraction` if probing an existing ancestor fails for a reason
    ///   other than absence
    pub fn resolve(name: &Path, target: &TargetDir) -> Result<Self> {
        if name.as_os_str().is_empty() {
            return Err(RetrieveError::path_security(name, SecurityRule::Degenerate));
        }

        if name.has_root() || name.is_absolute() {
            return Err(RetrieveError::path_security(name, SecurityRule::AbsolutePath));
        }

        let mut normalized = PathBuf::new();
        for component in name.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(RetrieveError::path_security(name, SecurityRule::AbsolutePath));
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(RetrieveError::path_security(name, SecurityRule::Traversal));
                    }
                }
                Component::Normal(part) => normalized.push(part),
            }
        }

        let candidate = target.as_path().join(&normalized);
        if !target.contains(&candidate) {
            return Err(RetrieveError::path_security(name, SecurityRule::Traversal));
        }

        check_existing_ancestor(&candidate, target, name)?;

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if the path resolves to the target directory itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns where a write to this path lands on disk.
    ///
    /// The deepest existing ancestor is canonicalized, so links already
    /// present below `target` are followed. Components that do not exist yet
    /// are appended unchanged.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if an existing ancestor cannot be probed or
    /// canonicalized.
    pub fn destination(&self, target: &TargetDir) -> io::Result<PathBuf> {
        let joined = target.join(self);
        for ancestor in joined.ancestors() {
            match std::fs::symlink_metadata(ancestor) {
                Ok(_) => {
                    let rest = joined.strip_prefix(ancestor).unwrap_or(Path::new(""));
                    return Ok(ancestor.canonicalize()?.join(rest));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(joined)
    }
}

/// Finds the deepest part of `candidate` that already exists and makes sure
/// its canonical form has not left the target.
fn check_existing_ancestor(candidate: &Path, target: &TargetDir, name: &Path) -> Result<()> {
    for ancestor in candidate.ancestors() {
        if ancestor == target.as_path() {
            return Ok(());
        }

        match std::fs::symlink_metadata(ancestor) {
            Ok(_) => {
                return match ancestor.canonicalize() {
                    Ok(canonical) if target.contains(&canonical) => Ok(()),
                    // Escaping or dangling links are both treated as traversal.
                    Ok(_) => Err(RetrieveError::path_security(name, SecurityRule::Traversal)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        Err(RetrieveError::path_security(name, SecurityRule::Traversal))
                    }
                    Err(e) => Err(RetrieveError::extraction(ancestor, e)),
                };
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(RetrieveError::extraction(ancestor, e)),
        }
    }
    Ok(())
}
