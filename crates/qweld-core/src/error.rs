//! Error types for QWELD value construction

use thiserror::Error;

/// Errors raised while constructing `Value`s from foreign representations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A list or map held another container. Arguments are one level deep.
    #[error("nested containers are not supported (at {path})")]
    NestedContainer { path: String },

    /// A JSON number that fits neither i64 nor f64.
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
}
