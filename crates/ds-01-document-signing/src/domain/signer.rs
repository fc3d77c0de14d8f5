//! # Signer
//!
//! `document bytes + timestamp + signer name -> SignatureRecord`.
//!
//! Ed25519 is deterministic, so the same document, timestamp, name and key
//! always give the same signature. Signing the same document again at another
//! time yields a second, equally valid record.

use super::entities::{SignaturePayload, SignatureRecord, SignerIdentity};
use super::errors::SigningError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use shared_crypto::{sha256_hash, Ed25519KeyPair, HASH_ALGORITHM, SIGNATURE_ALGORITHM};
use shared_types::Canonical;
use tracing::debug;

/// Render a signing instant as written into records.
///
/// RFC 3339 with microseconds and a numeric offset (never `Z`), e.g.
/// `2026-01-05T10:00:00.000000+07:00`.
pub fn format_timestamp(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Sign a document at a given, already-rendered timestamp.
///
/// The timestamp string is embedded literally and never re-derived.
pub fn sign_document(
    document: &[u8],
    keypair: &Ed25519KeyPair,
    signer: &SignerIdentity,
    timestamp: &str,
) -> Result<SignatureRecord, SigningError> {
    if signer.name.trim().is_empty() {
        return Err(SigningError::EmptySignerName);
    }

    let document_hash = sha256_hash(document).to_base64();

    let payload = SignaturePayload {
        document_hash: document_hash.clone(),
        timestamp: timestamp.to_string(),
        signer_name: signer.name.clone(),
    };
    let message = payload.canonical_bytes()?;
    let signature = keypair.sign(&message);

    debug!(
        "[ds-01] Signed {} bytes for '{}' at {}",
        document.len(),
        signer.name,
        timestamp
    );

    Ok(SignatureRecord {
        algorithm: SIGNATURE_ALGORITHM.to_string(),
        hash_algorithm: HASH_ALGORITHM.to_string(),
        document_hash,
        timestamp: timestamp.to_string(),
        signature: signature.as_bytes().to_vec(),
        signer: signer.clone(),
    })
}
