//! Host adapter layer.
//!
//! The fetcher and resolver know nothing about any package manager. This
//! module adapts them to a host's plugin contract:
//!
//! - `event`: lifecycle events the host dispatches
//! - `context`: the [`HostContext`] trait through which the host hands over
//!   its dependency snapshot and configuration bag
//! - `settings`: plugin settings read from that bag
//! - `installer`: the resolve-then-fetch pipeline
//!
//! # Architecture
//!
//! ```text
//! host event ──► Plugin::handle ──► Installer::run
//!                                       │
//!                                       ├── PluginSettings::from_extra
//!                                       ├── package::resolve
//!                                       └── ArtifactFetcher::fetch ──► files on disk
//! ```

mod context;
mod event;
mod installer;
mod settings;

pub use context::{HostContext, ProjectContext};
pub use event::{PluginEvent, UnknownEvent};
pub use installer::{resolve_target, InstallReport, Installer};
pub use settings::{PluginSettings, DEFAULT_TARGET_DIR, EXTRA_KEY};

use tracing::debug;

use crate::error::Result;
use crate::fetch::{ArtifactFetcher, FetchConfig, HttpTransport, ReqwestTransport};
use crate::progress::ProgressSink;

/// A host plugin.
///
/// Lifecycle hooks default to no-ops; only event handling is required.
pub trait Plugin {
    /// Called when the host loads the plugin.
    fn activate(&mut self, _ctx: &dyn HostContext, _sink: &dyn ProgressSink) {}

    /// Called when the host unloads the plugin.
    fn deactivate(&mut self, _ctx: &dyn HostContext, _sink: &dyn ProgressSink) {}

    /// Called when the plugin package is removed.
    fn uninstall(&mut self, _ctx: &dyn HostContext, _sink: &dyn ProgressSink) {}

    /// Events this plugin wants to receive.
    fn subscribed_events(&self) -> &'static [PluginEvent];

    /// Handle a dispatched event.
    ///
    /// An `Err` must be treated by the host as a failure of the whole
    /// command.
    fn handle(
        &self,
        event: PluginEvent,
        ctx: &dyn HostContext,
        sink: &dyn ProgressSink,
    ) -> Result<()>;
}

/// Downloads the PHP WASM runtime after installs and updates.
#[derive(Debug)]
pub struct PhpWasmPlugin<T: HttpTransport> {
    fetcher: ArtifactFetcher<T>,
    config: FetchConfig,
}

impl PhpWasmPlugin<ReqwestTransport> {
    /// Create a plugin using a reqwest transport built from `config`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> PhpWasmPlugin<T> {
    /// Events that trigger a download.
    pub const EVENTS: &'static [PluginEvent] =
        &[PluginEvent::PostInstallCmd, PluginEvent::PostUpdateCmd];

    /// Create a plugin over an explicit transport.
    pub fn with_transport(config: FetchConfig, transport: T) -> Self {
        Self {
            fetcher: ArtifactFetcher::new(transport),
            config,
        }
    }

    /// The fetch configuration in use.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Installer bound to this plugin's fetcher and configuration.
    pub fn installer(&self) -> Installer<'_, T> {
        Installer::new(&self.fetcher, &self.config)
    }
}

impl<T: HttpTransport> Plugin for PhpWasmPlugin<T> {
    fn activate(&mut self, ctx: &dyn HostContext, _sink: &dyn ProgressSink) {
        debug!(project = %ctx.project_root().display(), "Plugin activated");
    }

    fn subscribed_events(&self) -> &'static [PluginEvent] {
        Self::EVENTS
    }

    fn handle(
        &self,
        event: PluginEvent,
        ctx: &dyn HostContext,
        sink: &dyn ProgressSink,
    ) -> Result<()> {
        if !self.subscribed_events().contains(&event) {
            debug!(event = %event, "Ignoring unsubscribed event");
            return Ok(());
        }

        debug!(event = %event, "Handling event");
        self.installer().run(ctx, sink).map(|_| ())
    }
}
