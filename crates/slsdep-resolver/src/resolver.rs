//! Whole-set resolution of a product's dependencies.
//!
//! Stages run in a fixed order: collect the declared and discovered streams,
//! reject self-dependencies, check the ignore/optional policy, fold each
//! product through the merger, verify that every recommendation is accounted
//! for, and finally flag declarations that discovery makes redundant.

use std::collections::{BTreeMap, BTreeSet};

use slsdep_core::error::ConstraintError;
use slsdep_core::product::{ProductDependency, ProductId};
use slsdep_core::resolved::ResolvedDependencySet;

use crate::merger::merge_all;
use crate::report::{ResolutionNote, ResolutionReport};

/// The output of dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub dependencies: ResolvedDependencySet,
    pub report: ResolutionReport,
}

/// Resolves the dependencies of one product.
#[derive(Debug, Clone)]
pub struct ConstraintResolver {
    product: ProductId,
    ignored: BTreeSet<ProductId>,
    optional: BTreeSet<ProductId>,
}

type Grouped<'a> = BTreeMap<&'a ProductId, Vec<&'a ProductDependency>>;

impl ConstraintResolver {
    pub fn new(product: ProductId) -> Self {
        Self {
            product,
            ignored: BTreeSet::new(),
            optional: BTreeSet::new(),
        }
    }

    /// Products excluded from the result and from the completeness check.
    pub fn with_ignored(mut self, ids: impl IntoIterator<Item = ProductId>) -> Self {
        self.ignored.extend(ids);
        self
    }

    /// Discovered-only products that pass through, flagged optional.
    pub fn with_optional(mut self, ids: impl IntoIterator<Item = ProductId>) -> Self {
        self.optional.extend(ids);
        self
    }

    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Resolve developer-declared dependencies against those discovered in
    /// consumed artifacts.
    pub fn resolve(
        &self,
        declared: &[ProductDependency],
        discovered: &[ProductDependency],
    ) -> Result<Resolution, ConstraintError> {
        let declared_by_id = group(declared);
        let discovered_by_id: Grouped<'_> = group(discovered)
            .into_iter()
            .filter(|(id, _)| {
                let is_self = **id == self.product;
                if is_self {
                    tracing::debug!("dropping recommendation of {id} on itself");
                }
                !is_self
            })
            .collect();

        if declared_by_id.contains_key(&self.product) {
            return Err(ConstraintError::SelfDependency {
                product_id: self.product.clone(),
            });
        }

        self.check_policy(&declared_by_id)?;

        let mut resolved = ResolvedDependencySet::new();
        let mut report = ResolutionReport::new();

        let candidates: BTreeSet<&ProductId> = declared_by_id
            .keys()
            .copied()
            .chain(
                discovered_by_id
                    .keys()
                    .copied()
                    .filter(|id| self.optional.contains(*id) && !self.ignored.contains(*id)),
            )
            .collect();

        for id in candidates {
            let declared_entries = declared_by_id.get(id).map(Vec::as_slice).unwrap_or_default();
            let discovered_entries = discovered_by_id.get(id).map(Vec::as_slice).unwrap_or_default();
            let mut entries = declared_entries.iter().chain(discovered_entries).copied();
            let Some(first) = entries.next() else {
                continue;
            };
            let merged = merge_all(first, entries)?;

            if let (Some(declared_first), Some(discovered_first)) =
                (declared_entries.first(), discovered_entries.first())
            {
                let from_discovery = merge_all(discovered_first, discovered_entries[1..].iter().copied())?;
                if merged == from_discovery {
                    tracing::info!("{id}: declared dependency is redundant with discovered recommendations");
                    report.add(ResolutionNote::RedundantDeclaration {
                        declared: (*declared_first).clone(),
                        discovered: from_discovery,
                    });
                }
            }

            let optional =
                self.optional.contains(id) || declared_entries.iter().any(|d| d.is_optional());
            tracing::debug!("{id}: resolved to {merged}");
            resolved.insert(merged.with_optional(optional));
        }

        if let Some(missing) = discovered_by_id
            .keys()
            .find(|id| !self.ignored.contains(**id) && !resolved.contains(id))
        {
            return Err(ConstraintError::UnaccountedRecommendation {
                product_id: (*missing).clone(),
            });
        }

        for id in &self.optional {
            if !discovered_by_id.contains_key(id) {
                tracing::warn!("{id} is marked optional but no dependency recommends it");
                report.add(ResolutionNote::UnusedOptional {
                    product_id: id.clone(),
                });
            }
        }

        Ok(Resolution {
            dependencies: resolved.with_policy(self.optional.clone(), self.ignored.clone()),
            report,
        })
    }

    fn check_policy(&self, declared_by_id: &Grouped<'_>) -> Result<(), ConstraintError> {
        if let Some(id) = self.ignored.intersection(&self.optional).next() {
            return Err(ConstraintError::ConflictingPolicy {
                product_id: id.clone(),
                reason: "marked both ignored and optional".to_string(),
            });
        }
        for id in declared_by_id.keys() {
            if self.ignored.contains(*id) {
                return Err(ConstraintError::ConflictingPolicy {
                    product_id: (*id).clone(),
                    reason: "declared as a dependency but also ignored".to_string(),
                });
            }
            if self.optional.contains(*id) {
                return Err(ConstraintError::ConflictingPolicy {
                    product_id: (*id).clone(),
                    reason: "declared as a dependency but also listed as optional; \
                             mark the declaration itself optional instead"
                        .to_string(),
                });
            }
        }
        Ok(())
    }
}

fn group(deps: &[ProductDependency]) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = BTreeMap::new();
    for dep in deps {
        grouped.entry(dep.id()).or_default().push(dep);
    }
    grouped
}
