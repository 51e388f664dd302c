use miette::Diagnostic;
use thiserror::Error;

/// Application-level error for slsdep operations.
///
/// Constraint-algebra failures live in `slsdep_core::error::ConstraintError`;
/// both convert into `miette::Report` at the operation boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum SlsError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project configuration (e.g. product.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your product.toml for syntax errors"))]
    Config { message: String },

    /// A discovered dependency descriptor could not be read or parsed.
    #[error("Descriptor error: {message}")]
    Descriptor { message: String },

    /// The lock file on disk does not match the resolved dependencies.
    #[error("{path} is out of date:\n{diff}")]
    #[diagnostic(help("Run `slsdep lock` to regenerate it"))]
    LockfileDrift { path: String, diff: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type SlsResult<T> = miette::Result<T>;
