//! CLI error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by CLI commands. Any of them exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// The install pipeline could not be set up or resolved.
    #[error(transparent)]
    Install(#[from] phpwasm::Error),

    /// The plugin failed and already printed the failure through its sink.
    #[error(transparent)]
    Reported(phpwasm::Error),

    /// A project file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A project file is not valid JSON of the expected shape.
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid command-line or project configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Whether the failure was already shown to the user.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Reported(_))
    }
}

impl From<phpwasm::config::ConfigFileError> for CliError {
    fn from(e: phpwasm::config::ConfigFileError) -> Self {
        CliError::Install(e.into())
    }
}
