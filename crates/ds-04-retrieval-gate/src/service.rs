//! # Document Vault
//!
//! Application service implementing `RetrievalGateApi`.
//!
//! ## Flow
//!
//! - Signing: sign -> store document and sidecar -> register under a fresh id
//!   (stored artifacts are discarded again if registration fails)
//! - Retrieval: registry lookup -> load current bytes -> verify -> release or refuse

use ds_01_document_signing::{
    DocumentSigningApi, SignatureRecord, VerificationReport, VerificationStatus,
};
use ds_03_verification_registry::{RegistryEntry, VerificationId, VerificationRegistryApi};
use tracing::{info, warn};

use crate::domain::entities::{ReleasedDocument, SignedDocument};
use crate::domain::errors::RetrievalError;
use crate::domain::naming::validate_path_component;
use crate::ports::inbound::RetrievalGateApi;
use crate::ports::outbound::DocumentStore;

pub struct DocumentVault<S, R, D>
where
    S: DocumentSigningApi,
    R: VerificationRegistryApi,
    D: DocumentStore,
{
    signer: S,
    registry: R,
    store: D,
}

impl<S, R, D> DocumentVault<S, R, D>
where
    S: DocumentSigningApi,
    R: VerificationRegistryApi,
    D: DocumentStore,
{
    pub fn new(signer: S, registry: R, store: D) -> Self {
        Self {
            signer,
            registry,
            store,
        }
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &D {
        &self.store
    }
}

impl<S, R, D> RetrievalGateApi for DocumentVault<S, R, D>
where
    S: DocumentSigningApi,
    R: VerificationRegistryApi,
    D: DocumentStore,
{
    fn sign_and_register(
        &self,
        filename: &str,
        document: &[u8],
    ) -> Result<SignedDocument, RetrievalError> {
        validate_path_component(filename)?;

        let record = self.signer.sign(document)?;
        let location = self.store.store(filename, document, &record)?;

        let entry = self
            .registry
            .register_with_fresh_id(&|id: VerificationId| {
                RegistryEntry::new(
                    id,
                    filename,
                    &record.signer.name,
                    &record.timestamp,
                    &record.algorithm,
                    &location,
                )
            })
            .map_err(|e| {
                warn!("[ds-04] Could not register {}: {}", filename, e);
                if let Err(cleanup) = self.store.discard(&location) {
                    warn!(
                        "[ds-04] Unregistered artifacts left at {}: {}",
                        location, cleanup
                    );
                }
                e
            })?;

        info!(
            "[ds-04] ✍️ Signed {} as {} ({} bytes)",
            filename,
            entry.verification_id,
            document.len()
        );
        Ok(SignedDocument { entry, record })
    }

    fn inspect(&self, verification_id: &str) -> Result<RegistryEntry, RetrievalError> {
        Ok(self.registry.lookup(verification_id)?)
    }

    fn retrieve(&self, verification_id: &str) -> Result<ReleasedDocument, RetrievalError> {
        let entry = self.registry.lookup(verification_id)?;
        let id = entry.verification_id.to_string();

        let bytes = self
            .store
            .load_document(&entry.storage_location, &entry.filename)?;
        let record_bytes = self
            .store
            .load_signature_record(&entry.storage_location, &entry.filename)?;

        let record = match SignatureRecord::from_json_slice(&record_bytes) {
            Ok(record) => record,
            Err(e) => {
                warn!("[ds-04] ⛔ Refused {}: unreadable signature record ({})", id, e);
                return Err(RetrievalError::SignatureInvalid { verification_id: id });
            }
        };

        match self.signer.verify(&bytes, &record) {
            VerificationStatus::Valid => {
                info!("[ds-04] ✅ Released {} after re-verification", id);
                Ok(ReleasedDocument {
                    entry,
                    bytes,
                    record,
                })
            }
            VerificationStatus::DocumentTampered => {
                warn!("[ds-04] ⛔ Refused {}: document modified since signing", id);
                Err(RetrievalError::DocumentTampered { verification_id: id })
            }
            VerificationStatus::SignatureInvalid => {
                warn!("[ds-04] ⛔ Refused {}: signature invalid", id);
                Err(RetrievalError::SignatureInvalid { verification_id: id })
            }
        }
    }

    fn verify_upload(&self, document: &[u8], record_bytes: &[u8]) -> VerificationReport {
        let report = self.signer.verify_report(document, record_bytes);
        info!("[ds-04] Ad hoc verification: {:?}", report.status);
        report
    }
}
