//! Lock file codec for resolved product dependencies.
//!
//! One line per dependency, `group:name (minimum, maximum)` with an optional
//! trailing ` optional`, sorted by the rendered line and preceded by a fixed
//! header. Products published from the same build record their minimum as
//! `$projectVersion` when it equals the current build version, so the file
//! does not churn on every commit.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConstraintError;
use crate::matcher::VersionMatcher;
use crate::product::{ProductDependency, ProductId};
use crate::resolved::ResolvedDependencySet;
use crate::version::SlsVersion;

/// File name of the lock file, next to `product.toml`.
pub const LOCKFILE_NAME: &str = "product-dependencies.lock";

/// Stands in for the current build version of in-repo products.
pub const PROJECT_VERSION_PLACEHOLDER: &str = "$projectVersion";

pub const HEADER: &str = "# Run `slsdep lock` to regenerate this file";

static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:\s]+):(\S+) \(([^,\s]+), ([^)\s]+)\)( optional)?$")
        .expect("lock line pattern is valid")
});

/// Encodes and decodes lock files for one build.
#[derive(Debug, Clone)]
pub struct LockfileCodec {
    project_version: String,
    workspace_products: BTreeSet<ProductId>,
}

impl LockfileCodec {
    pub fn new(project_version: impl Into<String>) -> Self {
        Self {
            project_version: project_version.into(),
            workspace_products: BTreeSet::new(),
        }
    }

    /// Products published from the same multi-project build.
    pub fn with_workspace_products(mut self, products: BTreeSet<ProductId>) -> Self {
        self.workspace_products = products;
        self
    }

    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    /// Render the lock file text for `set`. Recommended versions and policy
    /// sets are not recorded.
    pub fn encode(&self, set: &ResolvedDependencySet) -> String {
        let mut lines: Vec<String> = set.iter().map(|dep| self.encode_line(dep)).collect();
        lines.sort();

        let mut out = String::from(HEADER);
        out.push('\n');
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn encode_line(&self, dep: &ProductDependency) -> String {
        let minimum = dep.minimum().to_string();
        let minimum = if self.workspace_products.contains(dep.id()) && minimum == self.project_version {
            PROJECT_VERSION_PLACEHOLDER.to_string()
        } else {
            minimum
        };
        let suffix = if dep.is_optional() { " optional" } else { "" };
        format!("{} ({minimum}, {}){suffix}", dep.id(), dep.maximum())
    }

    /// Parse lock file text, substituting the current project version for
    /// the placeholder.
    pub fn decode(&self, text: &str) -> Result<ResolvedDependencySet, ConstraintError> {
        let mut set = ResolvedDependencySet::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_number = idx + 1;
            let dep = self.decode_line(line).map_err(|reason| ConstraintError::LockFileParse {
                line_number,
                line: line.to_string(),
                reason,
            })?;
            if let Some(previous) = set.insert(dep) {
                return Err(ConstraintError::LockFileParse {
                    line_number,
                    line: line.to_string(),
                    reason: format!("duplicate entry for {}", previous.id()),
                });
            }
        }
        Ok(set)
    }

    fn decode_line(&self, line: &str) -> Result<ProductDependency, String> {
        let caps = LINE
            .captures(line)
            .ok_or_else(|| "expected `group:name (minimum, maximum)[ optional]`".to_string())?;

        let minimum = match &caps[3] {
            PROJECT_VERSION_PLACEHOLDER => self.project_version.as_str(),
            other => other,
        };
        let minimum = SlsVersion::parse(minimum).map_err(|e| e.to_string())?;
        let maximum = VersionMatcher::parse_bound(&caps[4]).map_err(|e| e.to_string())?;

        ProductDependency::new(ProductId::new(&caps[1], &caps[2]), minimum, maximum, None, false)
            .map(|dep| dep.with_optional(caps.get(5).is_some()))
            .map_err(|e| e.to_string())
    }
}
