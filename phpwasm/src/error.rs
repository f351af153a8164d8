//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigFileError;
use crate::fetch::{FetchError, TransportError};
use crate::package::ResolveError;

/// Result type for install operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of an install/update pass.
///
/// None of these are recovered locally: each aborts the remaining pipeline
/// and is surfaced to the host as a hard failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The package to take the version from is not in the snapshot.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Downloading or writing an artifact failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Required package metadata or plugin settings are missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The user configuration file could not be loaded.
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),

    /// The HTTP client could not be set up.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
