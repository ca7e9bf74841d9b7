//! Error types for retrieval operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::MemberKind;

/// Result type alias using `RetrieveError`.
pub type Result<T> = std::result::Result<T, RetrieveError>;

/// The security rule an archive member (or locator name) violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityRule {
    /// Member kind is never extracted (links, devices, special files).
    ForbiddenKind(MemberKind),
    /// Member name is absolute and would ignore the target directory.
    AbsolutePath,
    /// Member name resolves outside the target directory.
    Traversal,
    /// Member name is empty or resolves to the target directory itself.
    Degenerate,
    /// Locator name is not a single plain file name.
    NotAFileName,
}

impl std::fmt::Display for SecurityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForbiddenKind(kind) => write!(f, "{kind} entries are not allowed"),
            Self::AbsolutePath => write!(f, "absolute paths are not allowed"),
            Self::Traversal => write!(f, "path escapes the target directory"),
            Self::Degenerate => write!(f, "path does not name an entry below the target directory"),
            Self::NotAFileName => write!(f, "name must be a single file name component"),
        }
    }
}

/// Ways a network fetch can fail.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The locator does not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    /// Reading the response body failed mid-transfer.
    #[error("failed to read response body: {0}")]
    Body(#[source] std::io::Error),

    /// Writing the response body to the staging file failed.
    #[error("failed to write response body: {0}")]
    Write(#[source] std::io::Error),
}

/// Errors that can occur while retrieving a remote resource.
#[derive(Error, Debug)]
pub enum RetrieveError {
    /// Fetch failed (unreachable host, non-success status, transport or
    /// staging I/O failure).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// What went wrong.
        #[source]
        source: NetworkError,
    },

    /// An archive member violates the containment or type policy.
    ///
    /// When this error is returned nothing from the archive has been written.
    #[error("unsafe archive member {member}: {rule}")]
    PathSecurity {
        /// The offending member name.
        member: PathBuf,
        /// The rule that was violated.
        rule: SecurityRule,
    },

    /// I/O failure while reading the staged archive or writing its members.
    #[error("extraction failed at {path}: {source}")]
    Extraction {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RetrieveError {
    pub(crate) fn network(url: impl Into<String>, source: NetworkError) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn path_security(member: impl Into<PathBuf>, rule: SecurityRule) -> Self {
        Self::PathSecurity {
            member: member.into(),
            rule,
        }
    }

    pub(crate) fn extraction(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Extraction {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use irifetch_core::RetrieveError;
    /// use irifetch_core::SecurityRule;
    /// use std::path::PathBuf;
    ///
    /// let err = RetrieveError::PathSecurity {
    ///     member: PathBuf::from("../etc/passwd"),
    ///     rule: SecurityRule::Traversal,
    /// };
    /// assert!(err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathSecurity { .. })
    }

    /// Returns `true` if the fetch step failed.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns the offending member name for security violations.
    #[must_use]
    pub fn member(&self) -> Option<&Path> {
        match self {
            Self::PathSecurity { member, .. } => Some(member),
            _ => None,
        }
    }

    /// Returns the violated rule for security violations.
    #[must_use]
    pub const fn rule(&self) -> Option<SecurityRule> {
        match self {
            Self::PathSecurity { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_security_display() {
        let err = RetrieveError::path_security("../../evil.txt", SecurityRule::Traversal);
        let display = err.to_string();
        assert!(display.contains("../../evil.txt"));
        assert!(display.contains("escapes the target directory"));
        assert!(err.is_security_violation());
        assert!(!err.is_network());
    }

    #[test]
    fn test_forbidden_kind_display() {
        let err = RetrieveError::path_security(
            "link",
            SecurityRule::ForbiddenKind(MemberKind::Symlink),
        );
        assert!(err.to_string().contains("symlink entries are not allowed"));
        assert_eq!(
            err.rule(),
            Some(SecurityRule::ForbiddenKind(MemberKind::Symlink))
        );
        assert_eq!(err.member(), Some(Path::new("link")));
    }

    #[test]
    fn test_network_status_display() {
        let err = RetrieveError::network(
            "https://irimodel.org/IRI-2016/00_iri.tar",
            NetworkError::Status(reqwest::StatusCode::NOT_FOUND),
        );
        let display = err.to_string();
        assert!(display.contains("00_iri.tar"));
        assert!(display.contains("404"));
        assert!(err.is_network());
        assert!(!err.is_security_violation());
        assert_eq!(err.member(), None);
    }

    #[test]
    fn test_extraction_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full");
        let err = RetrieveError::extraction("/data/out/irisub.for", io_err);
        assert!(err.to_string().contains("irisub.for"));
        assert!(err.source().is_some());
        assert_eq!(err.rule(), None);
    }
}
