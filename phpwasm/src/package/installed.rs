//! Installed package entries from the host's dependency snapshot.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A declared requirement of an installed package.
///
/// Informational only: requirements never take part in version selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    /// Name of the required package (e.g., "php", "vendor/lib").
    pub package: String,

    /// Human-readable version constraint (e.g., "^8.1").
    pub constraint: String,
}

impl RequirementEntry {
    /// Create a new requirement entry.
    pub fn new(package: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for RequirementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.package, self.constraint)
    }
}

/// One package of an installed dependency snapshot.
///
/// Snapshots are provided by the host and are never mutated here. Entries
/// deserialize from lock file records shaped like:
///
/// ```json
/// { "name": "vendor/pkg", "version": "v1.2.3", "require": { "php": "^8.1" } }
/// ```
///
/// # Example
///
/// ```
/// use phpwasm::package::{InstalledPackage, RequirementEntry};
///
/// let package = InstalledPackage::new("vendor/pkg", "v1.2.3")
///     .with_requirement(RequirementEntry::new("php", "^8.1"));
///
/// assert_eq!(package.name, "vendor/pkg");
/// assert_eq!(package.requires.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPackage {
    /// Package identifier, unique within a snapshot.
    pub name: String,

    /// Raw version string as reported by the host (e.g., "v1.2.3-dev.4").
    pub version: String,

    /// Declared requirements, in declaration order.
    #[serde(
        default,
        rename = "require",
        deserialize_with = "requirements_from_map"
    )]
    pub requires: Vec<RequirementEntry>,
}

impl InstalledPackage {
    /// Create a package entry without requirements.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            requires: Vec::new(),
        }
    }

    /// Append a requirement (builder pattern).
    pub fn with_requirement(mut self, requirement: RequirementEntry) -> Self {
        self.requires.push(requirement);
        self
    }
}

impl fmt::Display for InstalledPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Lock files store requirements as a `{ "package": "constraint" }` object.
fn requirements_from_map<'de, D>(deserializer: D) -> Result<Vec<RequirementEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;

    map.into_iter()
        .map(|(package, constraint)| match constraint {
            Value::String(constraint) => Ok(RequirementEntry::new(package, constraint)),
            other => Err(D::Error::custom(format!(
                "constraint for {} must be a string, got {}",
                package, other
            ))),
        })
        .collect()
}
