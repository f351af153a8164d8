//! Loads a Composer project as a plugin host context.
//!
//! Reads `composer.json` for the root package name, version and `extra` bag,
//! and `composer.lock` for the installed snapshot (`packages` followed by
//! `packages-dev`).

use std::fs;
use std::io;
use std::path::Path;

use phpwasm::package::InstalledPackage;
use phpwasm::plugin::{ProjectContext, EXTRA_KEY};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CliError;

/// Project manifest file name.
pub const MANIFEST_FILE: &str = "composer.json";

/// Lock file name.
pub const LOCK_FILE: &str = "composer.lock";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    extra: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: Vec<InstalledPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<InstalledPackage>,
}

/// Load the project in `dir`.
///
/// A missing lock file yields an empty snapshot. The root package is
/// appended to the snapshot when the manifest declares a version.
pub fn load_project(dir: &Path) -> Result<ProjectContext, CliError> {
    let root = dir.canonicalize().map_err(|source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let manifest_path = root.join(MANIFEST_FILE);
    let manifest: Manifest = read_json(&manifest_path)?.ok_or_else(|| CliError::Read {
        path: manifest_path.clone(),
        source: io::Error::new(io::ErrorKind::NotFound, "no composer.json in project"),
    })?;

    let lock_path = root.join(LOCK_FILE);
    let lock: LockFile = match read_json(&lock_path)? {
        Some(lock) => lock,
        None => {
            warn!(path = %lock_path.display(), "No lock file; dependency snapshot is empty");
            LockFile::default()
        }
    };
    debug!(
        packages = lock.packages.len(),
        dev_packages = lock.packages_dev.len(),
        "Loaded lock file"
    );

    let mut ctx = ProjectContext::new(root)
        .with_packages(lock.packages)
        .with_packages(lock.packages_dev)
        .with_extra(manifest.extra.unwrap_or_else(|| Value::Object(Map::new())));

    if let Some(name) = manifest.name {
        if let Some(version) = manifest.version {
            ctx = ctx.with_package(InstalledPackage::new(name.clone(), version));
        }
        ctx = ctx.with_root_name(name);
    }

    Ok(ctx)
}

/// Set `extra.php-wasm.target-dir`, replacing any configured value.
pub fn override_target_dir(extra: &mut Value, target_dir: &Path) -> Result<(), CliError> {
    if !extra.is_object() {
        *extra = Value::Object(Map::new());
    }
    let section = extra
        .as_object_mut()
        .map(|root| {
            root.entry(EXTRA_KEY)
                .or_insert_with(|| Value::Object(Map::new()))
        })
        .and_then(Value::as_object_mut)
        .ok_or_else(|| CliError::Config(format!("extra.{} must be an object", EXTRA_KEY)))?;

    section.insert(
        "target-dir".to_string(),
        Value::String(target_dir.to_string_lossy().into_owned()),
    );
    Ok(())
}

/// Read and parse a JSON file; `Ok(None)` when it does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CliError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use phpwasm::plugin::HostContext;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_project_with_lock() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            MANIFEST_FILE,
            r#"{ "name": "acme/site", "extra": { "php-wasm": { "package": "syntaxx/php-wasm" } } }"#,
        );
        write(
            dir.path(),
            LOCK_FILE,
            r#"{
                "packages": [
                    { "name": "syntaxx/php-wasm", "version": "v0.1.4", "require": { "php": ">=8.1" } }
                ],
                "packages-dev": [
                    { "name": "phpunit/phpunit", "version": "10.5.0" }
                ]
            }"#,
        );

        let ctx = load_project(dir.path()).unwrap();

        let names: Vec<_> = ctx.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["syntaxx/php-wasm", "phpunit/phpunit"]);
        assert_eq!(ctx.root_package_name(), Some("acme/site"));
        assert_eq!(ctx.extra()["php-wasm"]["package"], "syntaxx/php-wasm");
        assert_eq!(ctx.project_root(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_root_package_with_version_joins_snapshot() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            MANIFEST_FILE,
            r#"{ "name": "syntaxx/php-wasm", "version": "v2.0.0-beta.1" }"#,
        );

        let ctx = load_project(dir.path()).unwrap();

        assert_eq!(ctx.packages().len(), 1);
        assert_eq!(ctx.packages()[0].version, "v2.0.0-beta.1");
        assert_eq!(ctx.extra(), &json!({}));
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_project(dir.path()),
            Err(CliError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_lock_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), MANIFEST_FILE, "{}");
        write(dir.path(), LOCK_FILE, r#"{ "packages": [ { "name": 1 } ] }"#);

        assert!(matches!(
            load_project(dir.path()),
            Err(CliError::Parse { .. })
        ));
    }

    #[test]
    fn test_override_target_dir() {
        let mut extra = json!({ "php-wasm": { "package": "a/b", "target-dir": "old" } });
        override_target_dir(&mut extra, Path::new("new/wasm")).unwrap();

        assert_eq!(
            extra,
            json!({ "php-wasm": { "package": "a/b", "target-dir": "new/wasm" } })
        );

        let mut empty = Value::Null;
        override_target_dir(&mut empty, Path::new("out")).unwrap();
        assert_eq!(empty, json!({ "php-wasm": { "target-dir": "out" } }));

        let mut wrong = json!({ "php-wasm": "nope" });
        assert!(override_target_dir(&mut wrong, Path::new("out")).is_err());
    }
}
