//! phpwasm CLI - fetch the PHP WASM runtime for a Composer project
//!
//! Acts as the host for the `phpwasm` plugin: loads `composer.json` and
//! `composer.lock`, then dispatches the post-install or post-update event.

mod commands;
mod composer;
mod console;
mod error;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ::console::style;
use phpwasm::plugin::PluginEvent;
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use commands::install::InstallArgs;
use commands::ProjectArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "phpwasm", version, about = "Download the PHP WASM runtime matching your locked version")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Download artifacts as after `composer install`
    Install(InstallArgs),

    /// Download artifacts as after `composer update`
    Update(InstallArgs),

    /// Dispatch a host event by name (e.g., post-install-cmd)
    RunScript {
        /// Event name
        event: PluginEvent,

        #[command(flatten)]
        args: InstallArgs,
    },

    /// Print the package and release version that would be fetched
    Resolve(ProjectArgs),

    /// Inspect the user configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Install(args) => commands::install::run(PluginEvent::PostInstallCmd, args),
        Commands::Update(args) => commands::install::run(PluginEvent::PostUpdateCmd, args),
        Commands::RunScript { event, args } => commands::install::run(event, args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{} {}", style("error:").red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}
