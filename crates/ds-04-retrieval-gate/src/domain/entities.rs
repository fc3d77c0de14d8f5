//! # Gate Entities

use ds_01_document_signing::SignatureRecord;
use ds_03_verification_registry::RegistryEntry;
use serde::Serialize;

/// Outcome of signing and registering a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedDocument {
    pub entry: RegistryEntry,
    pub record: SignatureRecord,
}

impl SignedDocument {
    pub fn verification_id(&self) -> &str {
        self.entry.verification_id.as_str()
    }
}

/// A document that passed re-verification at retrieval time.
#[derive(Clone, PartialEq, Eq)]
pub struct ReleasedDocument {
    pub entry: RegistryEntry,
    /// Bytes exactly as they were verified.
    pub bytes: Vec<u8>,
    pub record: SignatureRecord,
}

impl ReleasedDocument {
    /// Name to offer the downloader.
    pub fn download_name(&self) -> &str {
        &self.entry.signed_filename
    }
}

impl std::fmt::Debug for ReleasedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleasedDocument")
            .field("entry", &self.entry)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("record", &self.record)
            .finish()
    }
}
