//! Shared fixtures for the test suite.

use std::path::Path;

use chrono::DateTime;
use ds_01_document_signing::{DocumentSigningService, FixedClock, SignerIdentity};
use ds_03_verification_registry::{JsonFileRegistryStore, VerificationRegistry};
use ds_04_retrieval_gate::{DocumentVault, FileSystemDocumentStore};
use shared_crypto::Ed25519KeyPair;

/// Instant every fixture signs at.
pub const FIXED_TIMESTAMP: &str = "2026-01-05T10:00:00+07:00";

/// The same instant as written into signature records.
pub const FIXED_RECORD_TIMESTAMP: &str = "2026-01-05T10:00:00.000000+07:00";

/// A 10-byte document.
pub const HELLO_DOC: &[u8] = b"hello-doc\n";

pub type FileVault = DocumentVault<
    DocumentSigningService<FixedClock>,
    VerificationRegistry<JsonFileRegistryStore>,
    FileSystemDocumentStore,
>;

pub fn fixed_clock() -> FixedClock {
    FixedClock(DateTime::parse_from_rfc3339(FIXED_TIMESTAMP).expect("fixture timestamp"))
}

pub fn signer_with(seed: u8, name: &str) -> DocumentSigningService<FixedClock> {
    DocumentSigningService::new(
        Ed25519KeyPair::from_seed([seed; 32]),
        SignerIdentity::new(name),
        fixed_clock(),
    )
    .expect("fixture signer")
}

/// Vault with on-disk registry and uploads under `root`.
pub fn file_vault(root: &Path, seed: u8) -> FileVault {
    DocumentVault::new(
        signer_with(seed, "Alice"),
        VerificationRegistry::new(
            JsonFileRegistryStore::open(root.join("registry.json")).expect("fixture registry"),
        ),
        FileSystemDocumentStore::new(root.join("uploads")).expect("fixture uploads"),
    )
}
