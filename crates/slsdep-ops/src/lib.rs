pub mod ops_check;
pub mod ops_lock;
pub mod ops_manifest;

use std::path::{Path, PathBuf};

use slsdep_core::config::{ProjectConfig, CONFIG_FILE_NAME};
use slsdep_core::descriptor::RecommendedDependencies;
use slsdep_core::lockfile::{LockfileCodec, LOCKFILE_NAME};
use slsdep_core::product::ProductDependency;
use slsdep_resolver::resolver::{ConstraintResolver, Resolution};
use slsdep_util::errors::SlsResult;

/// A project whose dependencies have been resolved, ready to be locked or
/// rendered.
pub struct ResolvedProject {
    pub config: ProjectConfig,
    pub resolution: Resolution,
    pub codec: LockfileCodec,
    pub lockfile_path: PathBuf,
}

/// Load `product.toml` under `project_root`, read every configured
/// descriptor, and resolve the product's dependencies.
pub fn resolve_project(project_root: &Path) -> SlsResult<ResolvedProject> {
    let config = ProjectConfig::from_path(&project_root.join(CONFIG_FILE_NAME))?;
    let product = config.product_id();
    let project_version = config.project_version()?;

    let declared = config.declared_dependencies()?;
    let mut discovered: Vec<ProductDependency> = Vec::new();
    for path in config.descriptor_paths(project_root) {
        let descriptor = RecommendedDependencies::from_path(&path)?;
        let deps = descriptor.to_dependencies()?;
        tracing::debug!("{}: {} recommended dependencies", path.display(), deps.len());
        discovered.extend(deps);
    }

    let resolution = ConstraintResolver::new(product)
        .with_ignored(config.ignored()?)
        .with_optional(config.optional()?)
        .resolve(&declared, &discovered)?;

    let codec = LockfileCodec::new(project_version.to_string())
        .with_workspace_products(config.workspace_products()?);

    Ok(ResolvedProject {
        config,
        resolution,
        codec,
        lockfile_path: project_root.join(LOCKFILE_NAME),
    })
}

/// Print advisory notes from resolution to stderr.
pub fn print_report(project: &ResolvedProject) {
    if !project.resolution.report.is_empty() {
        eprint!("{}", project.resolution.report);
    }
}
