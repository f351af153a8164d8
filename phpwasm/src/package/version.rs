//! Release version normalization.
//!
//! Release tags are published as `v<major>.<minor>.<patch>`, while the host
//! reports whatever version string it resolved (`v1.2.3`, `1.2.3-beta.2`,
//! `1.2.3-dev.4`...). [`NormalizedVersion`] strips the decoration so the
//! result can be substituted into a release URL.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Leading `v` prefix or a `-dev`/`-alpha`/`-beta` suffix and everything after it.
///
/// The prefix is matched greedily so that normalizing twice never strips more.
fn decoration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)^v+|(?:-dev|-alpha|-beta).*$").unwrap())
}

/// A version string with release decoration removed.
///
/// Derived from a raw version on demand and never stored by the host.
///
/// # Example
///
/// ```
/// use phpwasm::package::NormalizedVersion;
///
/// assert_eq!(NormalizedVersion::new("v1.2.3-beta.4").as_str(), "1.2.3");
/// assert_eq!(NormalizedVersion::new("1.2.3").as_str(), "1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedVersion(String);

impl NormalizedVersion {
    /// Normalize a raw version string.
    ///
    /// Normalization is idempotent: `new(new(s).as_str()) == new(s)`.
    pub fn new(raw: &str) -> Self {
        Self(decoration_pattern().replace_all(raw, "").into_owned())
    }

    /// The normalized version text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a semantic version, if the normalized text is one.
    ///
    /// Hosts may report four-part or branch versions (`1.2.3.0`, `dev-main`)
    /// which are passed through unchanged but do not parse here.
    pub fn as_semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.0).ok()
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
