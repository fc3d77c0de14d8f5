//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{SignatureRecord, VerificationReport, VerificationStatus};
use crate::domain::errors::SigningError;
use shared_crypto::Ed25519PublicKey;

/// Primary Document Signing API.
///
/// Implementations hold their key material for the lifetime of the process
/// and must be thread-safe (`Send + Sync`).
pub trait DocumentSigningApi: Send + Sync {
    /// Sign a document at the current time.
    fn sign(&self, document: &[u8]) -> Result<SignatureRecord, SigningError>;

    /// Check a document against a parsed signature record.
    fn verify(&self, document: &[u8], record: &SignatureRecord) -> VerificationStatus;

    /// Check a document against raw sidecar bytes, for the presentation layer.
    fn verify_report(&self, document: &[u8], record_bytes: &[u8]) -> VerificationReport;

    /// Public key that verifies this service's signatures.
    fn public_key(&self) -> Ed25519PublicKey;
}
