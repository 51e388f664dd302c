//! CLI argument definitions for slsdep.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "slsdep",
    version,
    about = "Resolve and lock SLS product dependencies",
    long_about = "slsdep merges declared product dependencies with the recommendations \
                  embedded in consumed artifacts into one version range per product, \
                  and keeps product-dependencies.lock in sync with the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory containing product.toml (defaults to the nearest ancestor)
    #[arg(short = 'C', long, global = true, env = "SLSDEP_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve dependencies and write product-dependencies.lock
    Lock,

    /// Fail if product-dependencies.lock is out of date
    Check,

    /// Print the resolved product dependencies as manifest JSON
    Manifest,
}

pub fn parse() -> Cli {
    Cli::parse()
}
