//! Shared utilities for slsdep.
//!
//! This crate provides the cross-cutting concerns used by the other slsdep
//! crates: the application-level error type and small filesystem helpers.

pub mod errors;
pub mod fs;
