//! # Gate Errors

use ds_01_document_signing::SigningError;
use ds_03_verification_registry::RegistryError;
use thiserror::Error;

/// Errors from a `DocumentStore`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Filename or location would escape its directory, or is empty.
    #[error("Invalid path component: {0:?}")]
    InvalidName(String),

    /// The requested artifact does not exist.
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Document storage I/O error: {0}")]
    Io(String),

    #[error("Failed to serialize signature record: {0}")]
    Serialization(String),
}

/// Why a retrieval (or a signing request) was refused.
///
/// Tampering and signature failure are kept apart so callers can audit them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Verification id not found: {0}")]
    NotFound(String),

    /// The upload name cannot be stored safely.
    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("Document {verification_id} has been modified since it was signed")]
    DocumentTampered { verification_id: String },

    #[error("Signature for document {verification_id} is invalid")]
    SignatureInvalid { verification_id: String },

    #[error("Stored artifact missing: {0}")]
    MissingArtifact(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for RetrievalError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => RetrievalError::NotFound(id),
            other => RetrievalError::Registry(other),
        }
    }
}

impl From<StoreError> for RetrievalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => RetrievalError::MissingArtifact(what),
            StoreError::InvalidName(name) => RetrievalError::InvalidFilename(name),
            other => RetrievalError::Storage(other.to_string()),
        }
    }
}

impl RetrievalError {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            RetrievalError::NotFound(_) => "NOT_FOUND",
            RetrievalError::InvalidFilename(_) => "INVALID_FILENAME",
            RetrievalError::DocumentTampered { .. } => "DOCUMENT_TAMPERED",
            RetrievalError::SignatureInvalid { .. } => "SIGNATURE_INVALID",
            RetrievalError::MissingArtifact(_) => "MISSING_ARTIFACT",
            RetrievalError::Storage(_) => "STORAGE_ERROR",
            RetrievalError::Signing(_) => "SIGNING_ERROR",
            RetrievalError::Registry(_) => "REGISTRY_ERROR",
        }
    }

    /// True for the two refusals produced by re-verification.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            RetrievalError::DocumentTampered { .. } | RetrievalError::SignatureInvalid { .. }
        )
    }
}
