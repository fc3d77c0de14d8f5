//! # Document Signing Subsystem (ds-01)
//!
//! Binds a document's SHA-256 digest, a timestamp and the signer's name into a
//! canonical payload, signs it with Ed25519, and later checks a document
//! against the resulting [`SignatureRecord`].
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Payload construction, signing and verification, no I/O
//! - **Ports Layer** (`ports/`): Inbound API trait and the outbound `Clock`
//! - **Adapters** (`adapters/`): System and fixed clocks
//! - **Service Layer** (`service.rs`): Holds the key material and wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Fixity first**: a hash mismatch short-circuits before any signature check
//! - **Signed fields**: only `document_hash`, `timestamp` and the signer name are
//!   authenticated. `signer.system` and the algorithm labels are informational.
//! - **Fail closed**: a malformed record verifies as `SignatureInvalid`, never panics

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::clock::{FixedClock, SystemClock};
pub use domain::entities::{
    SignaturePayload, SignatureRecord, SignerIdentity, VerificationReport, VerificationStatus,
    DEFAULT_SIGNER_SYSTEM, SIDECAR_SUFFIX,
};
pub use domain::errors::{SigningError, VerificationError};
pub use domain::signer::{format_timestamp, sign_document};
pub use domain::verifier::{verify_document, verify_document_json};
pub use ports::inbound::DocumentSigningApi;
pub use ports::outbound::Clock;
pub use service::DocumentSigningService;
