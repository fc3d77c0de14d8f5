//! # Domain Errors
//!
//! Error types for the Verification Registry.

use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The id is already registered (ids are never reused).
    #[error("Verification id already registered: {0}")]
    DuplicateId(String),

    /// No entry exists for this id.
    #[error("Verification id not found: {0}")]
    NotFound(String),

    /// The text is not a well-formed verification id.
    #[error("Malformed verification id: {0}")]
    InvalidId(String),

    /// Fresh ids kept colliding.
    #[error("Could not allocate a unique verification id after {0} attempts")]
    IdAllocationFailed(usize),

    /// The backing store failed.
    #[error("Registry storage error: {0}")]
    Storage(String),

    /// The backing file exists but cannot be parsed.
    #[error("Registry file is corrupted: {0}")]
    Corrupted(String),
}
