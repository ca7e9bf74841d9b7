//! High-level retrieval API.
//!
//! [`retrieve`] runs the whole pipeline with default settings:
//!
//! 1. Fetch `url/filename` into the target directory
//! 2. If the payload is not an archive, keep it as fetched
//! 3. Otherwise list every member, validate the full list, extract, and
//!    remove the staged archive
//!
//! Nothing is extracted unless every member passed validation. On any
//! failure after the fetch the staged artifact stays on disk.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;
use tracing::warn;

use crate::ExtractionPolicy;
use crate::ExtractionReport;
use crate::FetchConfig;
use crate::FetchProgress;
use crate::NetworkError;
use crate::NoopProgress;
use crate::Result;
use crate::RetrieveError;
use crate::RetrieveReport;
use crate::RetrieveStatus;
use crate::SecurityRule;
use crate::cleanup::remove_staged;
use crate::extraction::Extractor;
use crate::fetch::Fetcher;
use crate::formats::ArchiveFormat;
use crate::formats::TarArchive;
use crate::formats::is_archive;
use crate::security::MemberValidator;
use crate::security::ValidatedMembers;
use crate::types::ArchiveMember;
use crate::types::ResourceLocator;
use crate::types::StagedArtifact;
use crate::types::TargetDir;

/// Retrieves `url/filename` into `directory`, extracting it if it is a tar
/// archive.
///
/// `filename` must be a single plain file name; it names both the remote
/// resource and the staged file inside `directory`. The directory is
/// created if missing.
///
/// # Errors
///
/// - `RetrieveError::Network` if the fetch fails, or if `directory` cannot
///   be created to stage the payload (`NetworkError::Write`, before any
///   request is sent); nothing is left behind
/// - `RetrieveError::PathSecurity` if `filename` is not a plain file name, or
///   any archive member is unsafe; nothing is extracted and the staged
///   archive is kept
/// - `RetrieveError::Extraction` if writing fails; members written so far
///   and the staged archive are kept
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::retrieve;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = retrieve("https://irimodel.org/IRI-2016", "00_iri.tar", "iri2016/source")?;
/// println!("{}: {} paths", report.status, report.written_paths.len());
/// # Ok(())
/// # }
/// ```
pub fn retrieve(
    url: &str,
    filename: &str,
    directory: impl AsRef<Path>,
) -> Result<RetrieveReport> {
    let locator = ResourceLocator::new(url, filename)?;
    let retriever = Retriever::new(&FetchConfig::default())
        .map_err(|e| RetrieveError::network(locator.url(), e))?;
    retriever.retrieve(&locator, &ExtractionPolicy::new(directory.as_ref()))
}

/// Reusable retrieval pipeline with explicit client settings.
///
/// A `Retriever` holds no per-call state and may be shared between threads
/// working on disjoint target directories.
#[derive(Debug, Clone)]
pub struct Retriever {
    fetcher: Fetcher,
}

impl Retriever {
    /// Creates a retriever.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Request` if the HTTP client cannot be built.
    pub fn new(config: &FetchConfig) -> std::result::Result<Self, NetworkError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Retrieves `locator` under `policy`.
    ///
    /// # Errors
    ///
    /// See [`retrieve`].
    pub fn retrieve(
        &self,
        locator: &ResourceLocator,
        policy: &ExtractionPolicy,
    ) -> Result<RetrieveReport> {
        self.retrieve_with_progress(locator, policy, &mut NoopProgress)
    }

    /// Retrieves `locator` under `policy`, reporting download progress.
    ///
    /// # Errors
    ///
    /// See [`retrieve`].
    pub fn retrieve_with_progress(
        &self,
        locator: &ResourceLocator,
        policy: &ExtractionPolicy,
        progress: &mut dyn FetchProgress,
    ) -> Result<RetrieveReport> {
        let start = Instant::now();
        let url = locator.url();
        let target = prepare_target(policy, &url)?;

        let staged = self.fetcher.fetch(locator, &target, progress)?;
        let bytes_fetched = staged.bytes();

        if !is_archive(staged.local_path())? {
            let path = staged.into_path();
            info!(%url, path = %path.display(), "stored payload as fetched");
            return Ok(RetrieveReport {
                url,
                status: RetrieveStatus::Stored,
                written_paths: vec![path],
                bytes_fetched,
                extraction: None,
                duration: start.elapsed(),
            });
        }

        let extraction = extract_staged(&staged, &target).inspect_err(|err| {
            warn!(
                %url,
                staged = %staged.local_path().display(),
                error = %err,
                "extraction failed, staged archive kept"
            );
        })?;
        remove_staged(staged)?;

        info!(
            %url,
            files = extraction.files_extracted,
            directories = extraction.directories_created,
            "retrieved archive"
        );
        Ok(RetrieveReport {
            url,
            status: RetrieveStatus::Extracted,
            written_paths: extraction.written_paths.clone(),
            bytes_fetched,
            extraction: Some(extraction),
            duration: start.elapsed(),
        })
    }
}

fn extract_staged(staged: &StagedArtifact, target: &TargetDir) -> Result<ExtractionReport> {
    let archive = TarArchive::open(staged.local_path());
    let members = archive.members()?;
    let validated = MemberValidator::new(target).validate(&members)?;
    check_staged_not_overwritten(staged, target, &validated)?;
    Extractor::new(target).extract(&archive, &validated)
}

/// The staged archive lives in the target directory, so a member whose
/// destination is the archive itself (by name or through an existing link)
/// would clobber it while it is being read.
fn check_staged_not_overwritten(
    staged: &StagedArtifact,
    target: &TargetDir,
    validated: &ValidatedMembers,
) -> Result<()> {
    let staged_path = staged
        .local_path()
        .canonicalize()
        .map_err(|e| RetrieveError::extraction(staged.local_path(), e))?;

    for v in validated {
        let destination = v
            .path
            .destination(target)
            .map_err(|e| RetrieveError::extraction(target.join(&v.path), e))?;
        if destination == staged_path {
            return Err(RetrieveError::extraction(
                &staged_path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "archive member {} would overwrite the staged archive",
                        v.member.name.display()
                    ),
                ),
            ));
        }
    }
    Ok(())
}

/// The target directory is where the payload is staged, so failing to
/// create it is a fetch-side write failure.
fn prepare_target(policy: &ExtractionPolicy, url: &str) -> Result<TargetDir> {
    policy.prepare().map_err(|err| match err {
        RetrieveError::Extraction { source, .. } => {
            RetrieveError::network(url, NetworkError::Write(source))
        }
        other => other,
    })
}

/// Result of inspecting a local file without writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Whether the file carries a tar signature.
    pub is_archive: bool,

    /// Every member, in archive order. Empty for non-archives.
    pub members: Vec<ArchiveMember>,

    /// The first member that failed validation and the rule it broke.
    pub rejected: Option<(PathBuf, SecurityRule)>,
}

impl Inspection {
    /// Returns `true` if the file would be stored or extracted.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.rejected.is_none()
    }
}

/// Classifies a local file and validates its members against `directory`.
///
/// Runs the same inspection and validation steps as [`retrieve`] but never
/// writes. `directory` must already exist.
///
/// # Errors
///
/// Returns `RetrieveError::Extraction` if the file or directory cannot be
/// read. Validation failures are reported in [`Inspection::rejected`].
pub fn inspect(path: impl AsRef<Path>, directory: impl AsRef<Path>) -> Result<Inspection> {
    let path = path.as_ref();
    let target = TargetDir::open(directory)?;

    if !is_archive(path)? {
        return Ok(Inspection {
            is_archive: false,
            members: Vec::new(),
            rejected: None,
        });
    }

    let members = TarArchive::open(path).members()?;
    let rejected = match MemberValidator::new(&target).validate(&members) {
        Ok(_) => None,
        Err(RetrieveError::PathSecurity { member, rule }) => Some((member, rule)),
        Err(e) => return Err(e),
    };

    Ok(Inspection {
        is_archive: true,
        members,
        rejected,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use mockito::Server;
    use tempfile::TempDir;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_retriever_is_send_sync() {
        assert_send_sync::<Retriever>();
    }

    #[test]
    fn test_retrieve_rejects_nested_filename_before_fetch() {
        let temp = TempDir::new().unwrap();
        let err = retrieve("http://127.0.0.1:9", "../evil.tar", temp.path()).unwrap_err();
        assert_eq!(err.rule(), Some(SecurityRule::NotAFileName));
    }

    #[test]
    fn test_member_named_like_staged_archive_is_refused() {
        let mut server = Server::new();
        let body = TarTestBuilder::new()
            .add_file("00_iri.tar", b"not really")
            .build();
        let _mock = server
            .mock("GET", "/00_iri.tar")
            .with_status(200)
            .with_body(body)
            .create();

        let temp = TempDir::new().unwrap();
        let err = retrieve(&server.url(), "00_iri.tar", temp.path()).unwrap_err();
        assert!(matches!(err, RetrieveError::Extraction { .. }));
        assert!(is_archive(&temp.path().join("00_iri.tar")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_member_linked_to_staged_archive_is_refused() {
        let mut server = Server::new();
        let body = TarTestBuilder::new()
            .add_file("alias", &[b'A'; 4096])
            .add_file("after.dat", b"after")
            .build();
        let _mock = server
            .mock("GET", "/00_iri.tar")
            .with_status(200)
            .with_body(body.clone())
            .create();

        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink("00_iri.tar", temp.path().join("alias")).unwrap();

        let err = retrieve(&server.url(), "00_iri.tar", temp.path()).unwrap_err();
        assert!(matches!(err, RetrieveError::Extraction { .. }));
        assert_eq!(std::fs::read(temp.path().join("00_iri.tar")).unwrap(), body);
        assert!(!temp.path().join("after.dat").exists());
    }

    #[test]
    fn test_uncreatable_directory_is_a_staging_failure() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/apf107.dat")
            .with_status(200)
            .with_body("apf107")
            .expect(0)
            .create();

        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("data");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = retrieve(&server.url(), "apf107.dat", blocker.join("index")).unwrap_err();
        assert!(matches!(
            err,
            RetrieveError::Network {
                source: NetworkError::Write(_),
                ..
            }
        ));
        mock.assert();
    }

    #[test]
    fn test_inspect_reports_first_rejection() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.tar");
        TarTestBuilder::new()
            .add_file("ok.dat", b"ok")
            .add_symlink("link", "/etc/passwd")
            .write_to(&path);

        let inspection = inspect(&path, temp.path()).unwrap();
        assert!(inspection.is_archive);
        assert_eq!(inspection.members.len(), 2);
        assert_eq!(
            inspection.rejected,
            Some((
                PathBuf::from("link"),
                SecurityRule::ForbiddenKind(crate::types::MemberKind::Symlink)
            ))
        );
        assert!(!inspection.is_safe());
        assert!(!temp.path().join("ok.dat").exists());
    }

    #[test]
    fn test_inspect_plain_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ig_rz.dat");
        std::fs::write(&path, "plain index data").unwrap();

        let inspection = inspect(&path, temp.path()).unwrap();
        assert!(!inspection.is_archive);
        assert!(inspection.members.is_empty());
        assert!(inspection.is_safe());
    }
}
