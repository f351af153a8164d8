//! `resolve` command: print the release version that would be fetched.

use phpwasm::plugin::resolve_target;

use super::ProjectArgs;
use crate::error::CliError;

pub fn run(args: ProjectArgs) -> Result<(), CliError> {
    let ctx = args.load_project()?;

    let (package, version) = resolve_target(&ctx)?;
    println!("{} {}", package, version);

    Ok(())
}
