//! The outcome of one resolution pass.

use std::collections::{BTreeMap, BTreeSet};

use crate::product::{ProductDependency, ProductId};

/// One merged dependency per product, plus the products that build
/// configuration marked optional or ignored.
///
/// Iteration is always in `(group, name)` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencySet {
    dependencies: BTreeMap<ProductId, ProductDependency>,
    optional: BTreeSet<ProductId>,
    ignored: BTreeSet<ProductId>,
}

impl ResolvedDependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dependencies(deps: impl IntoIterator<Item = ProductDependency>) -> Self {
        let mut set = Self::new();
        for dep in deps {
            set.insert(dep);
        }
        set
    }

    /// Insert a dependency, replacing any previous entry for the same product.
    pub fn insert(&mut self, dep: ProductDependency) -> Option<ProductDependency> {
        self.dependencies.insert(dep.id().clone(), dep)
    }

    pub fn with_policy(mut self, optional: BTreeSet<ProductId>, ignored: BTreeSet<ProductId>) -> Self {
        self.optional = optional;
        self.ignored = ignored;
        self
    }

    pub fn get(&self, id: &ProductId) -> Option<&ProductDependency> {
        self.dependencies.get(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.dependencies.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductDependency> {
        self.dependencies.values()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn optional(&self) -> &BTreeSet<ProductId> {
        &self.optional
    }

    pub fn ignored(&self) -> &BTreeSet<ProductId> {
        &self.ignored
    }

    /// What a lock file records: dependencies without recommended versions,
    /// and no policy sets.
    pub fn lock_view(&self) -> Self {
        Self::from_dependencies(self.iter().cloned().map(ProductDependency::without_recommended))
    }
}

impl<'a> IntoIterator for &'a ResolvedDependencySet {
    type Item = &'a ProductDependency;
    type IntoIter = std::collections::btree_map::Values<'a, ProductId, ProductDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.values()
    }
}
