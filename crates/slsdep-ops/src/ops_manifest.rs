//! Operation: render resolved product dependencies as manifest JSON.

use std::path::Path;

use slsdep_core::descriptor::to_manifest_json;
use slsdep_util::errors::{SlsError, SlsResult};

use crate::{print_report, resolve_project};

/// Resolve and return the `product-dependencies` JSON array.
pub fn manifest(project_root: &Path) -> SlsResult<String> {
    let project = resolve_project(project_root)?;
    print_report(&project);

    to_manifest_json(&project.resolution.dependencies).map_err(|e| {
        SlsError::Generic {
            message: format!("Failed to render product dependencies: {e}"),
        }
        .into()
    })
}
