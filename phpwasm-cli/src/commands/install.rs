//! `install`, `update` and `run-script` commands.
//!
//! Each fires a host event into the plugin, exactly as the package manager
//! would after installing dependencies.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use phpwasm::config::ConfigFile;
use phpwasm::fetch::FetchConfig;
use phpwasm::plugin::{PhpWasmPlugin, Plugin, PluginEvent};

use super::ProjectArgs;
use crate::composer;
use crate::console::ConsoleSink;
use crate::error::CliError;

/// Arguments for commands that download artifacts.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Directory to write artifacts to (overrides extra.php-wasm.target-dir)
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (overrides config.ini)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl InstallArgs {
    /// Build the fetch configuration: defaults, then config.ini, then flags.
    pub fn fetch_config(&self) -> Result<FetchConfig, CliError> {
        let config = ConfigFile::load()?.apply(FetchConfig::default());

        match self.timeout {
            Some(0) => Err(CliError::Config(
                "--timeout must be greater than zero".to_string(),
            )),
            Some(secs) => Ok(config.with_timeout(Duration::from_secs(secs))),
            None => Ok(config),
        }
    }
}

/// Dispatch `event` to the plugin for the project described by `args`.
///
/// Failures inside the plugin have already been printed by the console sink
/// and come back as [`CliError::Reported`].
pub fn run(event: PluginEvent, args: InstallArgs) -> Result<(), CliError> {
    let mut ctx = args.project.load_project()?;
    if let Some(target_dir) = &args.target_dir {
        composer::override_target_dir(ctx.extra_mut(), target_dir)?;
    }

    let config = args.fetch_config()?;
    let mut plugin = PhpWasmPlugin::new(config)?;
    let sink = ConsoleSink::new();

    plugin.activate(&ctx, &sink);
    let result = plugin.handle(event, &ctx, &sink);
    plugin.deactivate(&ctx, &sink);

    result.map_err(CliError::Reported)
}
