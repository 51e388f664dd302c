//! Command dispatch and handler modules.

mod check;
mod lock;
mod manifest;

use std::path::{Path, PathBuf};

use miette::Result;
use slsdep_core::config::CONFIG_FILE_NAME;
use slsdep_util::errors::SlsError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let project_root = project_root(cli.project_dir.as_deref())?;
    match cli.command {
        Command::Lock => lock::exec(&project_root),
        Command::Check => check::exec(&project_root),
        Command::Manifest => manifest::exec(&project_root),
    }
}

/// The explicit project directory, or the nearest ancestor of the current
/// directory holding a `product.toml`.
fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        tracing::debug!("using project directory {}", dir.display());
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(SlsError::Io)?;
    let root = slsdep_util::fs::find_ancestor_with(&cwd, CONFIG_FILE_NAME).ok_or_else(|| {
        SlsError::Config {
            message: format!("Could not find {CONFIG_FILE_NAME} in {} or any parent directory", cwd.display()),
        }
    })?;
    tracing::debug!("found {CONFIG_FILE_NAME} in {}", root.display());
    Ok(root)
}
