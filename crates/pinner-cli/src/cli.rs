//! CLI argument definitions for pinner.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pinner",
    version,
    about = "Pin git-hosted libraries to the highest versions satisfying every constraint",
    long_about = "pinner reads the dependencies declared in Pin.toml, discovers what each \
                  dependency declares in turn, and checks out the highest tagged version of \
                  every library that satisfies all constraints placed on it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to Pin.toml (default: nearest one from the current directory up)
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Directory under which libraries are cloned
    #[arg(long, global = true, value_name = "DIR", env = "PINNER_STAGING")]
    pub staging: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the top-level dependencies, one `<name> <constraint>` per line
    Report,

    /// Resolve all dependencies and check out the chosen versions
    Pin {
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display the dependency tree with resolved versions
    Tree {
        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Report or pin depending on PIN_MODE (unset or `report`, or `pin`)
    Run,
}

pub fn parse() -> Cli {
    Cli::parse()
}
