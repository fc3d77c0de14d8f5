//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while building a canonical record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalError {
    /// The same key was inserted twice into one object.
    #[error("Duplicate canonical key: {0}")]
    DuplicateKey(String),

    /// A field the record type requires is absent.
    #[error("Missing canonical field: {0}")]
    MissingField(String),
}
