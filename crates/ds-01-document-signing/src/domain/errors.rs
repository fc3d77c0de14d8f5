//! # Signing Errors
//!
//! Error types for signing and verification operations.

use shared_crypto::CryptoError;
use shared_types::CanonicalError;
use thiserror::Error;

/// Errors that can occur while producing or handling signature records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// Private key material is missing or malformed
    #[error("Key material unavailable: {0}")]
    KeyLoad(#[from] CryptoError),

    /// Signer identity has no name
    #[error("Signer name must not be empty")]
    EmptySignerName,

    /// Canonical payload could not be built
    #[error("Canonical encoding failed: {0}")]
    Canonical(#[from] CanonicalError),

    /// A signature record could not be parsed
    #[error("Malformed signature record: {0}")]
    MalformedRecord(String),

    /// A signature record could not be serialized
    #[error("Signature record serialization failed: {0}")]
    Serialization(String),
}

/// Why a document was refused.
///
/// Fixity and cryptographic failures stay distinct for audit purposes.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The document's bytes differ from what was signed
    #[error("Document has been modified since it was signed")]
    DocumentTampered,

    /// The signature does not verify against the public key
    #[error("Signature is invalid")]
    SignatureInvalid,
}
