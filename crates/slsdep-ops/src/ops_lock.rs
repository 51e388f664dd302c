//! Operation: resolve product dependencies and regenerate the lock file.

use std::path::Path;

use slsdep_util::errors::{SlsError, SlsResult};
use slsdep_util::fs::write_if_changed;

use crate::{print_report, resolve_project};

/// What `lock` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub dependencies: usize,
    pub written: bool,
}

/// Resolve and write `product-dependencies.lock` (write mode).
///
/// The previous file is never parsed, so a malformed lock file is simply
/// replaced.
pub fn lock(project_root: &Path) -> SlsResult<LockOutcome> {
    let project = resolve_project(project_root)?;
    print_report(&project);

    let text = project.codec.encode(&project.resolution.dependencies);
    let written = write_if_changed(&project.lockfile_path, &text)
        .map_err(SlsError::Io)?;

    let dependencies = project.resolution.dependencies.len();
    if written {
        tracing::info!("wrote {}", project.lockfile_path.display());
        eprintln!("Locked {dependencies} product dependencies");
    } else {
        eprintln!("Lock file is up to date ({dependencies} product dependencies)");
    }

    Ok(LockOutcome {
        dependencies,
        written,
    })
}
