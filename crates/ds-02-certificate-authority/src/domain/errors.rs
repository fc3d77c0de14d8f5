//! # Certificate Errors

use shared_crypto::CryptoError;
use shared_types::CanonicalError;
use thiserror::Error;

/// Errors from certificate issuance and handling.
///
/// Verification itself never errors: it answers `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CertificateError {
    /// CA key material is missing or malformed
    #[error("CA key material unavailable: {0}")]
    KeyLoad(#[from] CryptoError),

    /// Canonical payload could not be built
    #[error("Canonical encoding failed: {0}")]
    Canonical(#[from] CanonicalError),

    /// `not_after` is not later than `not_before`
    #[error("Invalid validity window: {not_before} .. {not_after}")]
    InvalidValidity {
        /// Window start
        not_before: String,
        /// Window end
        not_after: String,
    },

    /// The certificate's public key field cannot be decoded
    #[error("Certificate public key is malformed")]
    MalformedPublicKey,

    /// A certificate file could not be read or written
    #[error("Certificate I/O failed: {0}")]
    Io(String),

    /// A certificate could not be (de)serialized
    #[error("Certificate serialization failed: {0}")]
    Serialization(String),
}
