//! # Verifier
//!
//! Two phases, in this order:
//!
//! 1. **Fixity**: recompute SHA-256 of the bytes given and compare with the
//!    record's `document_hash`. A mismatch returns `DocumentTampered` without
//!    touching the signature.
//! 2. **Authenticity**: rebuild the payload from the record's own hash,
//!    timestamp and signer name, canonicalize, and check the Ed25519 signature.
//!
//! Every malformed input in phase 2 (unknown algorithm label, bad signature
//! length, unparsable record) is `SignatureInvalid`.

use super::entities::{SignatureRecord, VerificationReport, VerificationStatus};
use shared_crypto::{
    sha256_hash, Ed25519PublicKey, Ed25519Signature, HASH_ALGORITHM, SIGNATURE_ALGORITHM,
};
use shared_types::Canonical;
use tracing::{debug, warn};

/// Check a document against a signature record.
pub fn verify_document(
    document: &[u8],
    record: &SignatureRecord,
    public_key: &Ed25519PublicKey,
) -> VerificationStatus {
    // Phase 1: fixity
    let current_hash = sha256_hash(document).to_base64();
    if current_hash != record.document_hash {
        warn!(
            "[ds-01] Document hash mismatch for record signed at {}",
            record.timestamp
        );
        return VerificationStatus::DocumentTampered;
    }

    // Phase 2: authenticity
    if record.algorithm != SIGNATURE_ALGORITHM || record.hash_algorithm != HASH_ALGORITHM {
        warn!(
            "[ds-01] Unsupported algorithm labels: {} / {}",
            record.algorithm, record.hash_algorithm
        );
        return VerificationStatus::SignatureInvalid;
    }

    let message = match record.payload().canonical_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("[ds-01] Payload could not be rebuilt: {}", e);
            return VerificationStatus::SignatureInvalid;
        }
    };

    let signature = match Ed25519Signature::from_slice(&record.signature) {
        Ok(sig) => sig,
        Err(_) => {
            warn!(
                "[ds-01] Signature has wrong length: {} bytes",
                record.signature.len()
            );
            return VerificationStatus::SignatureInvalid;
        }
    };

    match public_key.verify(&message, &signature) {
        Ok(()) => {
            debug!("[ds-01] Signature valid for '{}'", record.signer.name);
            VerificationStatus::Valid
        }
        Err(e) => {
            warn!("[ds-01] Signature rejected for '{}': {}", record.signer.name, e);
            VerificationStatus::SignatureInvalid
        }
    }
}

/// Check a document against a raw sidecar file.
///
/// A sidecar that does not parse yields `SignatureInvalid` and a report with
/// no claimed metadata.
pub fn verify_document_json(
    document: &[u8],
    record_bytes: &[u8],
    public_key: &Ed25519PublicKey,
) -> VerificationReport {
    match SignatureRecord::from_json_slice(record_bytes) {
        Ok(record) => {
            let status = verify_document(document, &record, public_key);
            VerificationReport::new(status, Some(&record))
        }
        Err(e) => {
            warn!("[ds-01] {}", e);
            VerificationReport::new(VerificationStatus::SignatureInvalid, None)
        }
    }
}
