//! Command dispatch and handler modules.

mod pin;
mod report;
mod run;
mod tree;

use miette::Result;
use pinner_ops::ops_setup::GlobalOptions;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = GlobalOptions {
        manifest_path: cli.manifest_path,
        staging: cli.staging,
        verbose: cli.verbose,
    };
    match cli.command {
        Command::Report => report::exec(&global),
        Command::Pin { json } => pin::exec(&global, json),
        Command::Tree { depth } => tree::exec(&global, depth),
        Command::Run => run::exec(&global),
    }
}
