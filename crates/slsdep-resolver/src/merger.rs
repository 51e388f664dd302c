//! Merging of dependencies on the same product.
//!
//! The merge of several dependencies is the intersection of their ranges:
//! the highest minimum, the most restrictive maximum, and the highest
//! recommended version that still fits, or the minimum when none does.
//! The merged range is commutative and associative. A pairwise fold can lose
//! a recommendation that a later, tighter maximum would have kept, so callers
//! with more than two inputs use [`merge_all`], which gives the same result
//! for any input order.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::iter;

use slsdep_core::error::ConstraintError;
use slsdep_core::product::ProductDependency;
use slsdep_core::version::{OrderableVersion, SlsVersion};

/// Merge two dependencies on the same product.
pub fn merge(
    first: &ProductDependency,
    second: &ProductDependency,
) -> Result<ProductDependency, ConstraintError> {
    merge_all(first, iter::once(second))
}

/// Merge any number of dependencies on the same product in one pass.
///
/// The result always carries a recommended version: the highest orderable
/// recommendation inside the merged range, else the merged minimum. It is
/// never optional; callers re-apply optionality afterwards.
pub fn merge_all<'a>(
    first: &'a ProductDependency,
    rest: impl IntoIterator<Item = &'a ProductDependency>,
) -> Result<ProductDependency, ConstraintError> {
    let deps: Vec<&ProductDependency> = iter::once(first).chain(rest).collect();
    let id = first.id();

    if let Some(other) = deps.iter().find(|d| d.id() != id) {
        return Err(ConstraintError::MismatchedProduct {
            first: id.clone(),
            second: other.id().clone(),
        });
    }

    let (minimum, lower) = pick_minimum(&deps)?;

    let upper = deps
        .iter()
        .copied()
        .min_by(|a, b| a.maximum().cmp(&b.maximum()).then_with(|| tie_break(a, b)))
        .unwrap_or(first);
    let maximum = upper.maximum();

    if !maximum.admits(&minimum.base_release()) {
        return Err(ConstraintError::DisjointRanges {
            product_id: id.clone(),
            lower: Box::new(lower.clone()),
            upper: Box::new(upper.clone()),
            minimum: minimum.to_string(),
            maximum: maximum.to_string(),
        });
    }

    let in_range = |r: &OrderableVersion| {
        minimum.as_orderable().map_or(true, |min| r >= min) && maximum.admits(r)
    };
    let recommended = deps
        .iter()
        .filter_map(|d| d.recommended()?.as_orderable())
        .filter(|r| in_range(*r))
        .max()
        .map(|r| SlsVersion::Orderable(r.clone()))
        .unwrap_or_else(|| minimum.clone());

    tracing::debug!(
        "merged {} dependencies on {id} into ({minimum}, {maximum})",
        deps.len()
    );
    ProductDependency::new(id.clone(), minimum, maximum, Some(recommended), false)
}

/// The highest orderable minimum, and the dependency it came from.
///
/// Non-orderable minimums only count when no orderable one exists, and then
/// only if they all agree.
fn pick_minimum<'a>(
    deps: &[&'a ProductDependency],
) -> Result<(SlsVersion, &'a ProductDependency), ConstraintError> {
    let highest = deps
        .iter()
        .copied()
        .filter_map(|d| d.minimum().as_orderable().map(|v| (v, d)))
        .max_by(|(a, da), (b, db)| a.cmp(b).then_with(|| tie_break(db, da)));

    if let Some((version, dep)) = highest {
        if deps.iter().any(|d| !d.minimum().is_orderable()) {
            tracing::debug!(
                "{}: ignoring non-orderable minimum versions in favour of {version}",
                dep.id()
            );
        }
        return Ok((SlsVersion::Orderable(version.clone()), dep));
    }

    let first = deps[0];
    let distinct: BTreeSet<String> = deps.iter().map(|d| d.minimum().to_string()).collect();
    if distinct.len() == 1 {
        Ok((first.minimum().clone(), first))
    } else {
        Err(ConstraintError::AmbiguousMinimum {
            product_id: first.id().clone(),
            minimums: distinct.into_iter().collect(),
        })
    }
}

/// Deterministic choice between dependencies that tie on the compared bound,
/// so error reports do not depend on input order.
fn tie_break(a: &ProductDependency, b: &ProductDependency) -> Ordering {
    a.to_string().cmp(&b.to_string())
}
