//! Error types for the artifact fetcher.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::http::TransportError;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Maximum number of response body bytes kept in [`FetchError::Http`].
pub const BODY_EXCERPT_LIMIT: usize = 512;

/// Errors that can occur while fetching release artifacts.
///
/// Every variant carries the URL or path involved so a failure can be
/// diagnosed without re-running.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, timeout or body read failure.
    #[error("failed to download {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The release asset does not exist (HTTP 404).
    #[error("file not found (404): {url}\nPlease check if the version exists in the releases.")]
    NotFound { url: String },

    /// Any other HTTP status of 400 or above.
    #[error("HTTP error {status} while downloading {url}\nResponse: {body_excerpt}")]
    Http {
        url: String,
        status: u16,
        body_excerpt: String,
    },

    /// Failed to create the target directory.
    #[error("failed to create directory {}: {}", .path.display(), .source)]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write an artifact.
    #[error("failed to write {}: {}", .path.display(), .source)]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The fetch configuration is unusable.
    #[error("invalid fetch configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Network,
    NotFound,
    HttpError,
    FilesystemError,
    ConfigError,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::NotFound => "not found",
            Self::HttpError => "HTTP error",
            Self::FilesystemError => "filesystem error",
            Self::ConfigError => "configuration error",
        };
        f.write_str(name)
    }
}

impl FetchError {
    /// Classify this error.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network { .. } => FetchErrorKind::Network,
            Self::NotFound { .. } => FetchErrorKind::NotFound,
            Self::Http { .. } => FetchErrorKind::HttpError,
            Self::CreateDirFailed { .. } | Self::WriteFailed { .. } => {
                FetchErrorKind::FilesystemError
            }
            Self::InvalidConfig(_) => FetchErrorKind::ConfigError,
        }
    }

    /// The URL involved, for network and HTTP failures.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. } | Self::NotFound { url } | Self::Http { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }
}

/// Lossy UTF-8 view of the start of a response body, at most
/// [`BODY_EXCERPT_LIMIT`] bytes long.
pub(crate) fn body_excerpt(body: &[u8]) -> String {
    // Replacement characters are 3 bytes, so decode before cutting.
    let head = &body[..body.len().min(BODY_EXCERPT_LIMIT)];
    let decoded = String::from_utf8_lossy(head);
    let text = decoded.trim();

    let mut end = text.len().min(BODY_EXCERPT_LIMIT);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
