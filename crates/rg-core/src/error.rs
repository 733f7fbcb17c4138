//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where configuration problems can surface.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{kind} index {index} exceeds the id range")]
    IdOverflow { kind: &'static str, index: usize },
}

/// Shorthand result type for `rg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
