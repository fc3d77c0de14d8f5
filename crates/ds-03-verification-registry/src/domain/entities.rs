//! # Registry Entities
//!
//! - `VerificationId` - 128-bit random handle rendered as lowercase hex
//! - `RegistryEntry` - what the registry knows about one signed document

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::errors::RegistryError;

/// Prefix of the name under which a signed copy is offered for download.
pub const SIGNED_FILENAME_PREFIX: &str = "SIGNED_";

/// Download name for a signed copy of `filename`.
pub fn signed_filename_for(filename: &str) -> String {
    format!("{SIGNED_FILENAME_PREFIX}{filename}")
}

// =============================================================================
// VERIFICATION ID
// =============================================================================

/// Unguessable handle for a registered document.
///
/// Always 32 lowercase hex characters (16 bytes from the OS CSPRNG).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationId(String);

impl VerificationId {
    /// Number of random bytes behind an id.
    pub const BYTES: usize = 16;

    /// Length of the rendered id.
    pub const LENGTH: usize = Self::BYTES * 2;

    /// Draw a fresh id from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse user-supplied text. Only the canonical lowercase form is accepted.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        let well_formed = text.len() == Self::LENGTH
            && text
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(text.to_owned()))
        } else {
            Err(RegistryError::InvalidId(text.chars().take(64).collect()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VerificationId {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VerificationId> for String {
    fn from(id: VerificationId) -> Self {
        id.0
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationId({})", self.0)
    }
}

// =============================================================================
// REGISTRY ENTRY
// =============================================================================

/// Metadata recorded when a document is signed.
///
/// Everything here is informational. Trust decisions are made by
/// re-verifying the stored document against its stored signature record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub verification_id: VerificationId,
    /// Name the document was uploaded under.
    pub filename: String,
    /// Name offered on download.
    pub signed_filename: String,
    /// Signer name copied from the signature record.
    pub signer: String,
    /// Signing timestamp copied from the signature record.
    pub timestamp: String,
    pub algorithm: String,
    /// Opaque handle understood by the document store.
    pub storage_location: String,
}

impl RegistryEntry {
    /// Build an entry, deriving `signed_filename` from `filename`.
    pub fn new(
        verification_id: VerificationId,
        filename: impl Into<String>,
        signer: impl Into<String>,
        timestamp: impl Into<String>,
        algorithm: impl Into<String>,
        storage_location: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        Self {
            verification_id,
            signed_filename: signed_filename_for(&filename),
            filename,
            signer: signer.into(),
            timestamp: timestamp.into(),
            algorithm: algorithm.into(),
            storage_location: storage_location.into(),
        }
    }
}
