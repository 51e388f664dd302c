//! Core data types for slsdep.
//!
//! This crate defines the product-dependency constraint vocabulary: SLS
//! versions (orderable and non-orderable), wildcard version matchers, product
//! ids and validated product dependencies, the resolved dependency set, the
//! embedded descriptor JSON, the `product.toml` project config and the lock
//! file codec.
//!
//! Apart from the explicit `from_path` loaders, nothing here performs I/O.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod lockfile;
pub mod matcher;
pub mod product;
pub mod resolved;
pub mod version;
