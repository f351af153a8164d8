//! User-level configuration file.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/phpwasm/config.ini` on Linux):
//!
//! ```ini
//! [http]
//! timeout_secs = 300
//! user_agent = Composer/1.0
//! ```
//!
//! A missing file yields defaults. Values present in the file are layered
//! onto a [`FetchConfig`] with [`ConfigFile::apply`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::fetch::FetchConfig;

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "phpwasm";

/// File name of the user configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read.
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid INI.
    #[error("failed to parse config file {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },

    /// A known key holds an unusable value.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Location of the user configuration file, if a config directory exists.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `[http]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header value.
    pub user_agent: Option<String>,
}

/// Parsed user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub http: HttpSettings,
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults when the
    /// file (or the config directory) does not exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigFileError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&contents).map_err(|e| match e {
            ConfigFileError::Parse { message, .. } => ConfigFileError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse INI text.
    pub fn parse(contents: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigFileError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("http")) {
            if let Some(value) = section.get("timeout_secs") {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigFileError::InvalidValue {
                        key: "http.timeout_secs".to_string(),
                        value: value.to_string(),
                        reason: e.to_string(),
                    })?;
                if secs == 0 {
                    return Err(ConfigFileError::InvalidValue {
                        key: "http.timeout_secs".to_string(),
                        value: value.to_string(),
                        reason: "must be greater than zero".to_string(),
                    });
                }
                config.http.timeout_secs = Some(secs);
            }

            if let Some(value) = section.get("user_agent") {
                let value = value.trim();
                if !value.is_empty() {
                    config.http.user_agent = Some(value.to_string());
                }
            }
        }

        Ok(config)
    }

    /// Layer the settings present in this file onto `config`.
    pub fn apply(&self, mut config: FetchConfig) -> FetchConfig {
        if let Some(secs) = self.http.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.http.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        config
    }
}
