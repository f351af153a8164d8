//! Sequential download of release artifacts into a target directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::{ArtifactSpec, FetchConfig};
use super::error::{body_excerpt, FetchError, FetchResult};
use super::http::HttpTransport;
use crate::package::NormalizedVersion;
use crate::progress::ProgressSink;

/// A file written by a successful artifact download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Kind label of the artifact.
    pub kind: String,

    /// Path the artifact was written to.
    pub path: PathBuf,

    /// Number of bytes written.
    pub bytes: u64,
}

impl WrittenFile {
    /// File name component of the written path.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Downloads the configured artifacts for a version.
///
/// Artifacts are fetched strictly in order. The first failure aborts the
/// rest; files already written stay in place.
///
/// # Example
///
/// ```ignore
/// use phpwasm::fetch::{ArtifactFetcher, FetchConfig, ReqwestTransport};
/// use phpwasm::package::NormalizedVersion;
/// use phpwasm::progress::TracingSink;
///
/// let config = FetchConfig::default();
/// let fetcher = ArtifactFetcher::new(ReqwestTransport::new(&config)?);
/// let files = fetcher.fetch(
///     &NormalizedVersion::new("v0.0.9"),
///     &config,
///     "public/wasm".as_ref(),
///     &TracingSink,
/// )?;
/// ```
#[derive(Debug)]
pub struct ArtifactFetcher<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> ArtifactFetcher<T> {
    /// Create a fetcher over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Download every artifact in `config` to `target_dir`.
    ///
    /// The target directory (and its parents) is created before the first
    /// request. Each written file is reported to `sink` before the next
    /// artifact is attempted; a failure is reported once and returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] encountered.
    pub fn fetch(
        &self,
        version: &NormalizedVersion,
        config: &FetchConfig,
        target_dir: &Path,
        sink: &dyn ProgressSink,
    ) -> FetchResult<Vec<WrittenFile>> {
        if let Err(e) = config.validate().and_then(|()| ensure_dir(target_dir)) {
            sink.error(&e.to_string());
            return Err(e);
        }

        let mut written = Vec::with_capacity(config.artifacts.len());
        for artifact in &config.artifacts {
            match self.fetch_artifact(version, config, artifact, target_dir) {
                Ok(file) => {
                    sink.written(&file);
                    written.push(file);
                }
                Err(e) => {
                    sink.error(&format!("Error downloading {}: {}", artifact.filename, e));
                    return Err(e);
                }
            }
        }

        Ok(written)
    }

    fn fetch_artifact(
        &self,
        version: &NormalizedVersion,
        config: &FetchConfig,
        artifact: &ArtifactSpec,
        target_dir: &Path,
    ) -> FetchResult<WrittenFile> {
        let url = config.url_for(version, artifact);
        let body = self.download(&url)?;

        let path = target_dir.join(&artifact.filename);
        write_atomic(&path, &body)?;
        debug!(path = %path.display(), bytes = body.len(), "Wrote artifact");

        Ok(WrittenFile {
            kind: artifact.kind.clone(),
            path,
            bytes: body.len() as u64,
        })
    }

    /// GET `url` and classify the outcome.
    fn download(&self, url: &str) -> FetchResult<Vec<u8>> {
        debug!(url = %url, "Requesting artifact");

        let response = self
            .transport
            .get(url)
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        debug!(url = %url, status = response.status, "Received response");

        match response.status {
            404 => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
            status if status >= 400 => Err(FetchError::Http {
                url: url.to_string(),
                status,
                body_excerpt: body_excerpt(&response.body),
            }),
            _ => Ok(response.body),
        }
    }
}

/// Create the target directory and any missing parents.
fn ensure_dir(path: &Path) -> FetchResult<()> {
    fs::create_dir_all(path).map_err(|source| FetchError::CreateDirFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to a sibling part file, then rename it over `path`.
///
/// Readers never observe a half-written artifact.
fn write_atomic(path: &Path, bytes: &[u8]) -> FetchResult<()> {
    let part = part_path(path);

    let result = fs::write(&part, bytes).and_then(|()| fs::rename(&part, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&part);
        return Err(FetchError::WriteFailed {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.part", name))
}
