//! Network fetch into the target directory.

use std::path::PathBuf;

use reqwest::Url;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::debug;
use tracing::info;

use crate::FetchConfig;
use crate::FetchProgress;
use crate::NetworkError;
use crate::Result;
use crate::RetrieveError;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::io::CountingWriter;
use crate::types::ResourceLocator;
use crate::types::StagedArtifact;
use crate::types::TargetDir;

/// Mode given to a stored artifact; staging files are created owner-only.
#[cfg(unix)]
const STORED_MODE: u32 = 0o644;

/// Downloads resources over HTTP(S).
///
/// The body is streamed into an anonymous staging file inside the target
/// directory and only renamed to the locator's file name once the transfer
/// completed. A failed fetch therefore never leaves a file under that name.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with the given client settings.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Request` if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: &FetchConfig) -> std::result::Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(NetworkError::Request)?;
        Ok(Self { client })
    }

    /// Fetches `locator` into `target` and returns the staged artifact.
    ///
    /// The artifact is written to `target/<locator name>`, replacing any
    /// file of that name.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Network` if the URL is invalid, the host is
    /// unreachable, the server answers with a non-success status, or the
    /// body cannot be received or written.
    pub fn fetch(
        &self,
        locator: &ResourceLocator,
        target: &TargetDir,
        progress: &mut dyn FetchProgress,
    ) -> Result<StagedArtifact> {
        let url = locator.url();
        let fail = |source: NetworkError| RetrieveError::network(url.as_str(), source);

        let parsed = Url::parse(&url).map_err(|e| fail(NetworkError::InvalidUrl(e.to_string())))?;

        debug!(%url, "sending request");
        let mut response = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| fail(NetworkError::Request(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(NetworkError::Status(status)));
        }

        let staging = NamedTempFile::new_in(target.as_path())
            .map_err(|e| fail(NetworkError::Write(e)))?;

        progress.on_start(locator, response.content_length());
        let mut writer = CountingWriter::new(staging, progress);
        let mut buffer = CopyBuffer::new();
        let bytes = copy_with_buffer(&mut response, &mut writer, &mut buffer).map_err(|e| {
            fail(match e {
                CopyError::Read(e) => NetworkError::Body(e),
                CopyError::Write(e) => NetworkError::Write(e),
            })
        })?;
        let staging = writer.into_inner();
        progress.on_complete();

        let local_path: PathBuf = target.as_path().join(locator.name());
        staging
            .persist(&local_path)
            .map_err(|e| fail(NetworkError::Write(e.error)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&local_path, std::fs::Permissions::from_mode(STORED_MODE))
                .map_err(|e| fail(NetworkError::Write(e)))?;
        }

        info!(%url, path = %local_path.display(), bytes, "fetched");
        Ok(StagedArtifact::new(local_path, locator.clone(), bytes))
    }
}
