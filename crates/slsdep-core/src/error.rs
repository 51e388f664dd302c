//! Typed errors for the product-dependency constraint engine.

use miette::Diagnostic;
use thiserror::Error;

use crate::product::{ProductDependency, ProductId};

/// Every way parsing, validating, merging or resolving product dependencies
/// can fail. All variants are deterministic in their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConstraintError {
    #[error("Invalid version '{0}'")]
    #[diagnostic(help("Versions take the form 1.2.3, 1.2.3-rc4, 1.2.3-5-gabc123 or 1.2.3-foo.dirty"))]
    InvalidVersion(String),

    #[error("Invalid version matcher '{0}'")]
    #[diagnostic(help("Matchers take the form 1.2.x, 1.x.x or x.x.x"))]
    InvalidMatcher(String),

    #[error("Invalid product id '{0}'")]
    #[diagnostic(help("Product ids take the form group:name"))]
    InvalidProductId(String),

    #[error("Invalid product dependency on {product_id}: {reason}")]
    InvalidDependency { product_id: String, reason: String },

    #[error("Cannot merge dependencies on different products: {first} and {second}")]
    MismatchedProduct { first: ProductId, second: ProductId },

    #[error(
        "Dependency on {product_id} has no version satisfying both {lower} and {upper} \
         (computed minimum {minimum} is above computed maximum {maximum})"
    )]
    #[diagnostic(help("Two dependents require incompatible version ranges of {product_id}"))]
    DisjointRanges {
        product_id: ProductId,
        lower: Box<ProductDependency>,
        upper: Box<ProductDependency>,
        minimum: String,
        maximum: String,
    },

    #[error(
        "Cannot choose a minimum version of {} among non-orderable versions {}",
        .product_id,
        .minimums.join(", ")
    )]
    #[diagnostic(help("Declare an orderable minimum version for {product_id}"))]
    AmbiguousMinimum {
        product_id: ProductId,
        minimums: Vec<String>,
    },

    #[error("Product {product_id} must not declare a dependency on itself")]
    SelfDependency { product_id: ProductId },

    #[error("Conflicting policy for {product_id}: {reason}")]
    ConflictingPolicy { product_id: ProductId, reason: String },

    #[error("{product_id} is recommended by a dependency but neither declared, ignored nor marked optional")]
    #[diagnostic(help("Declare a product dependency on {product_id}, or add it to `policy.ignored` or `policy.optional`"))]
    UnaccountedRecommendation { product_id: ProductId },

    #[error("Malformed lock file line {line_number} '{line}': {reason}")]
    #[diagnostic(help("Run `slsdep lock` to regenerate the lock file"))]
    LockFileParse {
        line_number: usize,
        line: String,
        reason: String,
    },
}
