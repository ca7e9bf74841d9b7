//! Validated target directory type.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::RetrieveError;

use super::ContainedPath;

/// The canonical root that every write of a retrieval is confined to.
///
/// A `TargetDir` is guaranteed to exist, to be a directory, and to be held
/// in canonical (absolute, symlink-free) form, so containment checks can be
/// done by comparing path components.
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::types::TargetDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::create("/tmp/iri-data")?;
/// println!("Retrieving into: {}", target.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir(PathBuf);

impl TargetDir {
    /// Opens an existing directory as a target.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Extraction` if the path does not exist, is not
    /// a directory, or cannot be canonicalized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .map_err(|e| RetrieveError::extraction(path, e))?;

        if !canonical.is_dir() {
            return Err(RetrieveError::extraction(
                path,
                io::Error::new(io::ErrorKind::NotADirectory, "target is not a directory"),
            ));
        }

        Ok(Self(canonical))
    }

    /// Creates the directory (and its parents) if needed, then opens it.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Extraction` if the directory cannot be
    /// created or opened.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(|e| RetrieveError::extraction(path, e))?;
        Self::open(path)
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a contained path onto this directory.
    #[inline]
    #[must_use]
    pub fn join(&self, path: &ContainedPath) -> PathBuf {
        self.0.join(path.as_path())
    }

    /// Returns `true` if `path` is this directory or a descendant of it.
    ///
    /// Compares whole path components, so `/data/outside` is not inside
    /// `/data/out`.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}

impl AsRef<Path> for TargetDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_existing_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let target = TargetDir::open(temp.path()).unwrap();
        assert!(target.as_path().is_absolute());
        assert_eq!(target.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_open_missing_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = TargetDir::open(temp.path().join("missing"));
        assert!(matches!(result, Err(RetrieveError::Extraction { .. })));
    }

    #[test]
    fn test_open_file_is_rejected() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file = temp.path().join("apf107.dat");
        std::fs::write(&file, b"data").unwrap();
        assert!(TargetDir::open(&file).is_err());
    }

    #[test]
    fn test_create_nested() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nested = temp.path().join("data").join("index");
        let target = TargetDir::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(target.as_path().ends_with("data/index"));
    }

    #[test]
    fn test_contains_uses_components() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let out = temp.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let target = TargetDir::open(&out).unwrap();

        let sibling = target.as_path().parent().unwrap().join("outside");
        assert!(!target.contains(&sibling));
        assert!(target.contains(&target.as_path().join("irisub.for")));
        assert!(target.contains(target.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_resolves_symlinked_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let real = temp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let target = TargetDir::open(&link).unwrap();
        assert_eq!(target.as_path(), real.canonicalize().unwrap());
    }
}
