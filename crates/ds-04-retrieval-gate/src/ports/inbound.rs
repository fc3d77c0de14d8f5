//! # Inbound Ports (Driving Ports / API)

use ds_01_document_signing::VerificationReport;
use ds_03_verification_registry::RegistryEntry;

use crate::domain::entities::{ReleasedDocument, SignedDocument};
use crate::domain::errors::RetrievalError;

/// Operations offered to the presentation layer.
pub trait RetrievalGateApi: Send + Sync {
    /// Sign `document`, store it with its signature record and register it
    /// under a fresh verification id.
    fn sign_and_register(
        &self,
        filename: &str,
        document: &[u8],
    ) -> Result<SignedDocument, RetrievalError>;

    /// Registry metadata for a public verification page. No bytes are released.
    fn inspect(&self, verification_id: &str) -> Result<RegistryEntry, RetrievalError>;

    /// Re-verify the stored document and release it only if it is still authentic.
    fn retrieve(&self, verification_id: &str) -> Result<ReleasedDocument, RetrievalError>;

    /// Check a user-supplied document against a user-supplied sidecar.
    fn verify_upload(&self, document: &[u8], record_bytes: &[u8]) -> VerificationReport;
}
