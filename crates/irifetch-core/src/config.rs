//! Configuration for fetching and extraction.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Result;
use crate::types::TargetDir;

/// Default `User-Agent` header sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("irifetch/", env!("CARGO_PKG_VERSION"));

/// HTTP client settings for the fetcher.
///
/// # Examples
///
/// ```
/// use irifetch_core::FetchConfig;
/// use std::time::Duration;
///
/// // No internal time bound
/// let config = FetchConfig::default();
/// assert!(config.timeout.is_none());
///
/// let bounded = FetchConfig {
///     timeout: Some(Duration::from_secs(120)),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Whole-request time limit. `None` leaves timing to the caller.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl FetchConfig {
    /// Sets the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the whole-request time limit.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where retrieved content may be written.
///
/// The target directory is the sole input to the security policy: every
/// containment check is relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPolicy {
    target_directory: PathBuf,
}

impl ExtractionPolicy {
    /// Creates a policy for the given directory. No I/O happens here.
    pub fn new(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
        }
    }

    /// Returns the directory as configured.
    #[must_use]
    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    /// Creates the target directory if needed and returns it canonicalized.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Extraction` if the directory cannot be created
    /// or canonicalized. The retrieval pipeline reports this as a staging
    /// failure, `NetworkError::Write`.
    pub fn prepare(&self) -> Result<TargetDir> {
        TargetDir::create(&self.target_directory)
    }
}
