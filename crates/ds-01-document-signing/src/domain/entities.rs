//! # Domain Entities
//!
//! The signed payload, the persisted signature record, and verification outcomes.

use super::errors::{SigningError, VerificationError};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use shared_types::{Canonical, CanonicalError, CanonicalObject};

/// Default value of `signer.system` in new records.
pub const DEFAULT_SIGNER_SYSTEM: &str = "Digital Signature System v1";

/// Suffix appended to a document's file name for its signature record.
pub const SIDECAR_SUFFIX: &str = ".sig.json";

// =============================================================================
// Signer identity
// =============================================================================

/// Who signs, as written into every record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerIdentity {
    /// Signer's display name (part of the signed payload)
    pub name: String,
    /// Signing system label (not signed)
    pub system: String,
}

impl SignerIdentity {
    /// Identity with the default system label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: DEFAULT_SIGNER_SYSTEM.to_string(),
        }
    }

    /// Override the system label.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }
}

// =============================================================================
// Signed payload
// =============================================================================

/// The exact set of fields that is canonicalized and signed.
///
/// Canonical form: `{"document_hash": .., "signer": .., "timestamp": ..}`.
/// Adding a field here invalidates every existing signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignaturePayload {
    /// Base64 SHA-256 of the document
    pub document_hash: String,
    /// Signing time as written in the record
    pub timestamp: String,
    /// Signer's name
    pub signer_name: String,
}

impl Canonical for SignaturePayload {
    fn to_canonical(&self) -> Result<CanonicalObject, CanonicalError> {
        CanonicalObject::from_fields([
            ("document_hash", self.document_hash.as_str()),
            ("timestamp", self.timestamp.as_str()),
            ("signer", self.signer_name.as_str()),
        ])
    }
}

// =============================================================================
// Signature record
// =============================================================================

/// Output of a signing operation, persisted next to the document.
///
/// Serialized as pretty JSON with every field verbatim, so the payload can be
/// rebuilt byte-for-byte at verification time.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Signature algorithm label (`Ed25519`)
    pub algorithm: String,
    /// Hash algorithm label (`SHA-256`)
    pub hash_algorithm: String,
    /// Base64 SHA-256 of the signed document
    pub document_hash: String,
    /// Signing time, RFC 3339 with explicit offset
    pub timestamp: String,
    /// Ed25519 signature over the canonical payload
    #[serde_as(as = "Base64")]
    pub signature: Vec<u8>,
    /// Signer identity
    pub signer: SignerIdentity,
}

impl SignatureRecord {
    /// Rebuild the signed payload from this record's own fields.
    pub fn payload(&self) -> SignaturePayload {
        SignaturePayload {
            document_hash: self.document_hash.clone(),
            timestamp: self.timestamp.clone(),
            signer_name: self.signer.name.clone(),
        }
    }

    /// Pretty JSON for the sidecar file.
    pub fn to_json_pretty(&self) -> Result<String, SigningError> {
        serde_json::to_string_pretty(self).map_err(|e| SigningError::Serialization(e.to_string()))
    }

    /// Parse a sidecar file.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SigningError> {
        serde_json::from_slice(bytes).map_err(|e| SigningError::MalformedRecord(e.to_string()))
    }
}

// =============================================================================
// Verification outcome
// =============================================================================

/// Result of checking a document against a signature record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// Hash matches and the signature verifies
    Valid,
    /// The document's bytes differ from what was signed
    DocumentTampered,
    /// The signature does not verify, or the record is malformed
    SignatureInvalid,
}

impl VerificationStatus {
    /// Whether the document is authentic.
    pub fn is_valid(self) -> bool {
        matches!(self, VerificationStatus::Valid)
    }

    /// User-facing message for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            VerificationStatus::Valid => "Signature VALID",
            VerificationStatus::DocumentTampered => "Document has been modified",
            VerificationStatus::SignatureInvalid => "Signature INVALID",
        }
    }

    /// Convert into a `Result` carrying the specific denial reason.
    pub fn into_result(self) -> Result<(), VerificationError> {
        match self {
            VerificationStatus::Valid => Ok(()),
            VerificationStatus::DocumentTampered => Err(VerificationError::DocumentTampered),
            VerificationStatus::SignatureInvalid => Err(VerificationError::SignatureInvalid),
        }
    }
}

/// Verification result handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Whether the document is authentic
    pub valid: bool,
    /// Specific outcome
    pub status: VerificationStatus,
    /// User-facing message
    pub message: String,
    /// Timestamp claimed by the record, if it could be read
    pub timestamp: Option<String>,
    /// Signer claimed by the record, if it could be read
    pub signer: Option<String>,
    /// Algorithm claimed by the record, if it could be read
    pub algorithm: Option<String>,
}

impl VerificationReport {
    /// Build a report for a status and the record it was checked against.
    pub fn new(status: VerificationStatus, record: Option<&SignatureRecord>) -> Self {
        Self {
            valid: status.is_valid(),
            status,
            message: status.message().to_string(),
            timestamp: record.map(|r| r.timestamp.clone()),
            signer: record.map(|r| r.signer.name.clone()),
            algorithm: record.map(|r| r.algorithm.clone()),
        }
    }
}
