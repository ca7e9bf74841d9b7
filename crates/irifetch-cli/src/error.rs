//! Error conversion utilities for CLI.
//!
//! Converts irifetch-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use irifetch_core::NetworkError;
use irifetch_core::RetrieveError;
use irifetch_core::SecurityRule;

/// Converts `RetrieveError` to user-friendly anyhow error with context.
///
/// `subject` names what was being processed (a URL or a local file).
pub fn convert_retrieve_error(err: RetrieveError, subject: &str) -> anyhow::Error {
    match err {
        RetrieveError::PathSecurity {
            member,
            rule: rule @ SecurityRule::NotAFileName,
        } => {
            anyhow!(
                "Invalid file name '{}': {rule}\n\
                 HINT: Pass the directory part of the location as URL and only the file name as FILENAME.",
                member.display()
            )
        }
        RetrieveError::PathSecurity { member, rule } => {
            anyhow!(
                "Security violation: '{subject}' contains unsafe member '{}': {rule}\n\
                 HINT: Nothing was extracted. Do not unpack this archive from an untrusted source.",
                member.display()
            )
        }
        RetrieveError::Network {
            url,
            source: NetworkError::Status(status),
        } => {
            anyhow!(
                "Server refused '{url}': {status}\n\
                 HINT: Check that the file name and URL are correct."
            )
        }
        RetrieveError::Network {
            url,
            source: NetworkError::InvalidUrl(reason),
        } => {
            anyhow!(
                "Invalid URL '{url}': {reason}\n\
                 HINT: URLs must include a scheme, e.g. https://irimodel.org/IRI-2016"
            )
        }
        RetrieveError::Network { url, source } => anyhow::Error::from(source)
            .context(format!("Network error while fetching '{url}'")),
        RetrieveError::Extraction { path, source } => {
            anyhow!(
                "I/O error while processing '{subject}' at '{}': {source}",
                path.display()
            )
        }
    }
}

/// Adds context to a core result.
pub fn add_retrieve_context<T>(
    result: Result<T, RetrieveError>,
    subject: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_retrieve_error(e, subject))
}

#[cfg(test)]
mod tests {
    use super::*;
    use irifetch_core::MemberKind;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_traversal_error() {
        let err = RetrieveError::PathSecurity {
            member: PathBuf::from("../../../etc/passwd"),
            rule: SecurityRule::Traversal,
        };
        let converted = convert_retrieve_error(err, "https://example.org/evil.tar");
        let msg = format!("{converted:?}");
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("../../../etc/passwd"));
        assert!(msg.contains("evil.tar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_forbidden_kind_error() {
        let err = RetrieveError::PathSecurity {
            member: PathBuf::from("latest"),
            rule: SecurityRule::ForbiddenKind(MemberKind::Symlink),
        };
        let msg = format!("{:?}", convert_retrieve_error(err, "links.tar"));
        assert!(msg.contains("symlink"));
    }

    #[test]
    fn test_convert_file_name_error() {
        let err = RetrieveError::PathSecurity {
            member: PathBuf::from("IRI-2016/00_iri.tar"),
            rule: SecurityRule::NotAFileName,
        };
        let msg = format!("{:?}", convert_retrieve_error(err, "ignored"));
        assert!(msg.contains("Invalid file name"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_url_error() {
        let err = RetrieveError::Network {
            url: "irimodel.org/00_iri.tar".to_string(),
            source: NetworkError::InvalidUrl("relative URL without a base".to_string()),
        };
        let msg = format!("{:?}", convert_retrieve_error(err, "irimodel.org"));
        assert!(msg.contains("Invalid URL"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = RetrieveError::Extraction {
            path: PathBuf::from("/data/source/irisub.for"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_retrieve_error(err, "00_iri.tar"));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("irisub.for"));
    }
}
