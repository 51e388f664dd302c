//! Product-dependency JSON as embedded in artifact manifests.
//!
//! Discovered dependencies arrive as
//! `{"recommended-product-dependencies": [ ... ]}`; the resolved set leaves
//! as a bare JSON array of the same entry shape.

use std::path::Path;

use serde::{Deserialize, Serialize};
use slsdep_util::errors::SlsError;

use crate::error::ConstraintError;
use crate::product::ProductDependency;
use crate::resolved::ResolvedDependencySet;

/// One product dependency in its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductDependencyEntry {
    pub product_group: String,
    pub product_name: String,
    pub minimum_version: String,
    pub maximum_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_version: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ProductDependencyEntry {
    /// Parse and validate the entry. The `optional` flag is not carried
    /// over: optionality of discovered dependencies is decided by policy.
    pub fn to_dependency(&self) -> Result<ProductDependency, ConstraintError> {
        ProductDependency::from_strings(
            &self.product_group,
            &self.product_name,
            &self.minimum_version,
            &self.maximum_version,
            self.recommended_version.as_deref(),
        )
    }
}

impl From<&ProductDependency> for ProductDependencyEntry {
    fn from(dep: &ProductDependency) -> Self {
        Self {
            product_group: dep.id().group.clone(),
            product_name: dep.id().name.clone(),
            minimum_version: dep.minimum().to_string(),
            maximum_version: dep.maximum().to_string(),
            recommended_version: dep.recommended().map(ToString::to_string),
            optional: dep.is_optional(),
        }
    }
}

/// The recommendations embedded in one resolved artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedDependencies {
    #[serde(default, rename = "recommended-product-dependencies")]
    pub dependencies: Vec<ProductDependencyEntry>,
}

impl RecommendedDependencies {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load and parse a descriptor file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SlsError::Descriptor {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&content).map_err(|e| {
            SlsError::Descriptor {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn to_dependencies(&self) -> Result<Vec<ProductDependency>, ConstraintError> {
        self.dependencies
            .iter()
            .map(ProductDependencyEntry::to_dependency)
            .collect()
    }
}

/// Render a resolved set as the manifest JSON array, in `(group, name)` order.
pub fn to_manifest_json(set: &ResolvedDependencySet) -> Result<String, serde_json::Error> {
    let entries: Vec<ProductDependencyEntry> = set.iter().map(ProductDependencyEntry::from).collect();
    serde_json::to_string_pretty(&entries)
}
