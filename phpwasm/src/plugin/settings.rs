//! Plugin settings read from the host's configuration bag.
//!
//! Settings live under the `php-wasm` key of the project's `extra` object:
//!
//! ```json
//! { "extra": { "php-wasm": { "target-dir": "web/wasm", "package": "syntaxx/php-wasm" } } }
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// Key of the plugin's section in the configuration bag.
pub const EXTRA_KEY: &str = "php-wasm";

/// Target directory used when `target-dir` is not set, relative to the
/// project root.
pub const DEFAULT_TARGET_DIR: &str = "public/wasm";

/// Settings for one install/update pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSettings {
    /// Override for the artifact directory.
    pub target_dir: Option<PathBuf>,

    /// Package whose version selects the release.
    pub package: Option<String>,
}

impl PluginSettings {
    /// Read settings from the host's `extra` bag.
    ///
    /// A missing `php-wasm` section (or a bag that is not an object) yields
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the section or one of its known keys
    /// has the wrong type.
    pub fn from_extra(extra: &Value) -> Result<Self> {
        let section = match extra.get(EXTRA_KEY) {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(section)) => section,
            Some(other) => {
                return Err(Error::Config(format!(
                    "extra.{} must be an object, got {}",
                    EXTRA_KEY, other
                )))
            }
        };

        Ok(Self {
            target_dir: string_setting(section.get("target-dir"), "target-dir")?
                .map(PathBuf::from),
            package: string_setting(section.get("package"), "package")?,
        })
    }

    /// Directory artifacts are written to.
    ///
    /// Relative paths are resolved against `project_root`.
    pub fn target_dir(&self, project_root: &Path) -> PathBuf {
        let dir = self
            .target_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TARGET_DIR));
        project_root.join(dir)
    }

    /// Name of the package to resolve: the `package` setting, else the
    /// root package name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when neither is available or the name is
    /// empty.
    pub fn package_name<'a>(&'a self, root_name: Option<&'a str>) -> Result<&'a str> {
        let name = self.package.as_deref().or(root_name).ok_or_else(|| {
            Error::Config(format!(
                "no package name found: set extra.{}.package or give the root package a name",
                EXTRA_KEY
            ))
        })?;

        if name.trim().is_empty() {
            return Err(Error::Config("package name is empty".to_string()));
        }
        Ok(name)
    }
}

fn string_setting(value: Option<&Value>, key: &str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::Config(format!(
            "extra.{}.{} must be a string, got {}",
            EXTRA_KEY, key, other
        ))),
    }
}
