//! # Outbound Ports (Driven Ports)

use ds_01_document_signing::SignatureRecord;

use crate::domain::errors::StoreError;

/// Durable storage for signed documents and their signature records.
///
/// `location` is an opaque handle chosen by the store and kept in the registry.
pub trait DocumentStore: Send + Sync {
    /// Persist a document next to its signature record. Returns the location.
    fn store(
        &self,
        filename: &str,
        document: &[u8],
        record: &SignatureRecord,
    ) -> Result<String, StoreError>;

    /// Current bytes of a stored document.
    fn load_document(&self, location: &str, filename: &str) -> Result<Vec<u8>, StoreError>;

    /// Raw sidecar bytes. Parsing is left to the verifier so a damaged
    /// record is reported as an invalid signature.
    fn load_signature_record(&self, location: &str, filename: &str)
        -> Result<Vec<u8>, StoreError>;

    /// Remove everything stored at `location`. Unknown locations are a no-op.
    fn discard(&self, location: &str) -> Result<(), StoreError>;
}
