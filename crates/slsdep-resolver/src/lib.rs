//! Product-dependency constraint engine: merges same-product dependencies
//! into their tightest common range, resolves a product's declared and
//! discovered dependencies under ignore/optional policy, and reports
//! redundant declarations.

pub mod merger;
pub mod report;
pub mod resolver;
