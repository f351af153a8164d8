//! Configuration for the artifact fetcher.

use std::time::Duration;

use super::error::{FetchError, FetchResult};
use crate::package::NormalizedVersion;

/// Placeholder replaced by the normalized version in a URL template.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Placeholder replaced by the artifact kind label in a URL template.
pub const KIND_PLACEHOLDER: &str = "{kind}";

/// Release download URL for the PHP WASM builds.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github.com/Syntaxx-HQ/PHPX-phpwasmbuilder/releases/download/v{version}/php-vrzno-web.{kind}";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Composer/1.0";

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// A single release artifact: the label substituted into the URL and the
/// file name it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Kind label, substituted for `{kind}` (e.g., "mjs", "wasm").
    pub kind: String,

    /// Destination file name inside the target directory.
    pub filename: String,
}

impl ArtifactSpec {
    /// Create a new artifact spec.
    pub fn new(kind: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            filename: filename.into(),
        }
    }

    /// The JavaScript loader module.
    pub fn script() -> Self {
        Self::new("mjs", "php-vrzno-web.mjs")
    }

    /// The WebAssembly binary.
    pub fn binary() -> Self {
        Self::new("wasm", "php-vrzno-web.wasm")
    }
}

/// Configuration for [`ArtifactFetcher`](super::ArtifactFetcher).
///
/// Passed in at call time so tests can substitute the URL and file table.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// URL template containing `{version}` and `{kind}` exactly once each.
    pub url_template: String,

    /// Artifacts to download, fetched in this order.
    pub artifacts: Vec<ArtifactSpec>,

    /// Value of the `User-Agent` request header.
    pub user_agent: String,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            artifacts: vec![ArtifactSpec::script(), ArtifactSpec::binary()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    /// Create a configuration with the given URL template and no artifacts.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            artifacts: Vec::new(),
            ..Default::default()
        }
    }

    /// Add an artifact to the configuration.
    pub fn with_artifact(mut self, kind: impl Into<String>, filename: impl Into<String>) -> Self {
        self.artifacts.push(ArtifactSpec::new(kind, filename));
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the template and artifact table.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidConfig`] when a placeholder is missing or
    /// repeated, no artifacts are configured, or a file name would escape
    /// the target directory.
    pub fn validate(&self) -> FetchResult<()> {
        for placeholder in [VERSION_PLACEHOLDER, KIND_PLACEHOLDER] {
            let count = self.url_template.matches(placeholder).count();
            if count != 1 {
                return Err(FetchError::InvalidConfig(format!(
                    "URL template must contain {} exactly once, found {}",
                    placeholder, count
                )));
            }
        }

        if self.artifacts.is_empty() {
            return Err(FetchError::InvalidConfig(
                "no artifacts configured".to_string(),
            ));
        }

        for artifact in &self.artifacts {
            let name = artifact.filename.as_str();
            if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
                return Err(FetchError::InvalidConfig(format!(
                    "artifact file name '{}' must be a plain file name",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Build the download URL for one artifact.
    ///
    /// Placeholders are substituted in a single left-to-right pass, so
    /// substituted values are never rescanned.
    pub fn url_for(&self, version: &NormalizedVersion, artifact: &ArtifactSpec) -> String {
        let mut url = String::with_capacity(self.url_template.len() + 32);
        let mut rest = self.url_template.as_str();

        while let Some(start) = rest.find('{') {
            let (literal, tail) = rest.split_at(start);
            url.push_str(literal);

            if let Some(after) = tail.strip_prefix(VERSION_PLACEHOLDER) {
                url.push_str(version.as_str());
                rest = after;
            } else if let Some(after) = tail.strip_prefix(KIND_PLACEHOLDER) {
                url.push_str(&artifact.kind);
                rest = after;
            } else {
                url.push('{');
                rest = &tail[1..];
            }
        }
        url.push_str(rest);

        url
    }
}
