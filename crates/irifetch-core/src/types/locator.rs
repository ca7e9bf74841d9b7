//! Remote resource locator.

use std::path::Component;
use std::path::Path;

use crate::Result;
use crate::RetrieveError;
use crate::SecurityRule;

/// Identifies a remote resource: a base URL and a file name beneath it.
///
/// The name doubles as the staged file name inside the target directory, so
/// it must be a single plain path component.
///
/// # Examples
///
/// ```
/// use irifetch_core::types::ResourceLocator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let locator = ResourceLocator::new("https://irimodel.org/IRI-2016/", "00_iri.tar")?;
/// assert_eq!(locator.url(), "https://irimodel.org/IRI-2016/00_iri.tar");
///
/// assert!(ResourceLocator::new("https://irimodel.org", "../00_iri.tar").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator {
    base_url: String,
    name: String,
}

impl ResourceLocator {
    /// Creates a locator after checking that `name` is a plain file name.
    ///
    /// # Errors
    ///
    /// Returns `PathSecurity` with `NotAFileName` if the name is empty, has
    /// more than one component, or is `.`/`..`/absolute.
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_plain_file_name(&name) {
            return Err(RetrieveError::path_security(name, SecurityRule::NotAFileName));
        }
        Ok(Self {
            base_url: base_url.into(),
            name,
        })
    }

    /// Returns the base URL as given.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full URL: `base_url + "/" + name`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.name)
    }
}

impl std::fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
