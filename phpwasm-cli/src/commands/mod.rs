//! CLI command implementations.

pub mod config;
pub mod install;
pub mod resolve;

use std::path::PathBuf;

use clap::Args;
use phpwasm::plugin::ProjectContext;

use crate::composer;
use crate::error::CliError;

/// Options shared by commands that read a project.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project directory containing composer.json
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,
}

impl ProjectArgs {
    /// Load the project as a host context.
    pub fn load_project(&self) -> Result<ProjectContext, CliError> {
        composer::load_project(&self.project_dir)
    }
}
