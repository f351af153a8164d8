//! Version lookup over an installed package snapshot.

use thiserror::Error;
use tracing::{debug, warn};

use super::installed::InstalledPackage;
use super::version::NormalizedVersion;

/// Errors from resolving a package version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The requested package is not part of the snapshot.
    #[error("package {name} is not installed")]
    NotFound { name: String },

    /// An empty package name was requested.
    #[error("package name must not be empty")]
    EmptyName,
}

/// Find `target_name` in the snapshot and return its normalized version.
///
/// Names are compared exactly (case-sensitive). The snapshot is scanned once
/// in order; if a name appears more than once the first entry wins.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] when no entry carries the name, which
/// is always the case for an empty snapshot, and [`ResolveError::EmptyName`]
/// when `target_name` is empty.
pub fn resolve(
    packages: &[InstalledPackage],
    target_name: &str,
) -> Result<NormalizedVersion, ResolveError> {
    if target_name.is_empty() {
        return Err(ResolveError::EmptyName);
    }

    let package = packages
        .iter()
        .find(|package| package.name == target_name)
        .ok_or_else(|| ResolveError::NotFound {
            name: target_name.to_string(),
        })?;

    let version = NormalizedVersion::new(&package.version);
    debug!(
        package = %package.name,
        raw = %package.version,
        normalized = %version,
        "Resolved package version"
    );

    if version.as_semver().is_none() {
        warn!(
            package = %package.name,
            version = %version,
            "Resolved version is not a semantic version; a matching release may not exist"
        );
    }

    Ok(version)
}
