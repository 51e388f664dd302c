use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use slsdep_util::errors::SlsError;

use crate::error::ConstraintError;
use crate::product::{ProductDependency, ProductId};
use crate::version::SlsVersion;

/// File name of the project configuration.
pub const CONFIG_FILE_NAME: &str = "product.toml";

/// The parsed representation of a `product.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    pub product: ProductMetadata,

    #[serde(default)]
    pub product_dependencies: Vec<DeclaredDependency>,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Identity of the product being built, from `[product]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub group: String,
    pub name: String,
    pub version: String,
}

/// A developer-authored entry from `[[product-dependencies]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeclaredDependency {
    pub group: String,
    pub name: String,
    pub minimum_version: String,
    #[serde(default)]
    pub maximum_version: Option<String>,
    #[serde(default)]
    pub recommended_version: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

/// `[policy]`: products to ignore entirely or to pass through as optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub ignored: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

/// `[workspace]`: products published from the same multi-project build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub products: Vec<String>,
}

/// `[discovery]`: descriptor files holding recommended dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub descriptors: Vec<PathBuf>,
}

impl ProjectConfig {
    /// Load and parse a `product.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SlsError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content).map_err(|e| {
            SlsError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn product_id(&self) -> ProductId {
        ProductId::new(&self.product.group, &self.product.name)
    }

    pub fn project_version(&self) -> Result<SlsVersion, ConstraintError> {
        SlsVersion::parse(&self.product.version)
    }

    pub fn declared_dependencies(&self) -> Result<Vec<ProductDependency>, ConstraintError> {
        self.product_dependencies
            .iter()
            .map(|d| {
                ProductDependency::declared(
                    &d.group,
                    &d.name,
                    &d.minimum_version,
                    d.maximum_version.as_deref(),
                    d.recommended_version.as_deref(),
                )
                .map(|dep| dep.with_optional(d.optional))
            })
            .collect()
    }

    pub fn ignored(&self) -> Result<BTreeSet<ProductId>, ConstraintError> {
        parse_ids(&self.policy.ignored)
    }

    pub fn optional(&self) -> Result<BTreeSet<ProductId>, ConstraintError> {
        parse_ids(&self.policy.optional)
    }

    pub fn workspace_products(&self) -> Result<BTreeSet<ProductId>, ConstraintError> {
        parse_ids(&self.workspace.products)
    }

    /// Descriptor paths resolved against the directory holding the config.
    pub fn descriptor_paths(&self, project_root: &Path) -> Vec<PathBuf> {
        self.discovery
            .descriptors
            .iter()
            .map(|p| project_root.join(p))
            .collect()
    }
}

fn parse_ids(raw: &[String]) -> Result<BTreeSet<ProductId>, ConstraintError> {
    raw.iter().map(|s| ProductId::parse(s)).collect()
}
