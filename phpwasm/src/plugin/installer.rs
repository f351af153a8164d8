//! The install pipeline run for each subscribed event.
//!
//! 1. Read plugin settings from the configuration bag
//! 2. Pick the package name and resolve its version
//! 3. Fetch the release artifacts into the target directory

use std::path::PathBuf;

use tracing::info;

use super::context::HostContext;
use super::settings::PluginSettings;
use crate::error::Result;
use crate::fetch::{ArtifactFetcher, FetchConfig, HttpTransport, WrittenFile};
use crate::package::{resolve, NormalizedVersion};
use crate::progress::ProgressSink;

/// Result of a completed install pass.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Package the version was taken from.
    pub package: String,
    /// Release version that was fetched.
    pub version: NormalizedVersion,
    /// Directory the artifacts were written to.
    pub target_dir: PathBuf,
    /// Files written, in fetch order.
    pub files: Vec<WrittenFile>,
}

/// Runs resolve-then-fetch against a host context.
pub struct Installer<'a, T: HttpTransport> {
    fetcher: &'a ArtifactFetcher<T>,
    config: &'a FetchConfig,
}

impl<'a, T: HttpTransport> Installer<'a, T> {
    /// Create an installer using `fetcher` and `config`.
    pub fn new(fetcher: &'a ArtifactFetcher<T>, config: &'a FetchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolve the release version for `ctx` without fetching anything.
    pub fn resolve_version(&self, ctx: &dyn HostContext) -> Result<(String, NormalizedVersion)> {
        resolve_target(ctx)
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Any settings, resolve or fetch failure aborts the pass. Settings and
    /// resolve failures are reported to `sink` here; fetch failures are
    /// reported by the fetcher.
    pub fn run(&self, ctx: &dyn HostContext, sink: &dyn ProgressSink) -> Result<InstallReport> {
        let (settings, package, version) = match prepare(ctx) {
            Ok(prepared) => prepared,
            Err(e) => {
                sink.error(&e.to_string());
                return Err(e);
            }
        };

        sink.info(&format!("Installing PHP WASM version: {}", version));

        let target_dir = settings.target_dir(ctx.project_root());
        info!(
            package = %package,
            version = %version,
            target_dir = %target_dir.display(),
            "Installing release artifacts"
        );

        let files = self
            .fetcher
            .fetch(&version, self.config, &target_dir, sink)?;

        Ok(InstallReport {
            package,
            version,
            target_dir,
            files,
        })
    }
}

/// Name of the package that selects the release, and its normalized version.
///
/// Needs only the host context: no transport or fetch configuration.
pub fn resolve_target(ctx: &dyn HostContext) -> Result<(String, NormalizedVersion)> {
    let (_, package, version) = prepare(ctx)?;
    Ok((package, version))
}

fn prepare(ctx: &dyn HostContext) -> Result<(PluginSettings, String, NormalizedVersion)> {
    let settings = PluginSettings::from_extra(ctx.extra())?;
    let package = settings.package_name(ctx.root_package_name())?.to_string();
    let version = resolve(ctx.packages(), &package)?;
    Ok((settings, package, version))
}
