//! # Retrieval Gate (ds-04)
//!
//! Ties signing, storage and the registry together and guards every release
//! of a signed document.
//!
//! ## Security Property
//!
//! A stored document is never served on the strength of "it was valid when
//! signed". Each `retrieve` loads the bytes currently in storage together with
//! their signature record and runs the verifier again. Tampering after signing
//! is refused with a specific reason:
//!
//! | Failure | Error |
//! |---------|-------|
//! | Unknown or malformed id | `RetrievalError::NotFound` |
//! | Document or sidecar missing | `RetrievalError::MissingArtifact` |
//! | Bytes differ from the signed hash | `RetrievalError::DocumentTampered` |
//! | Record or signature does not check out | `RetrievalError::SignatureInvalid` |
//!
//! ## Crate Structure
//!
//! - `domain/` - released/signed document types, errors, filename rules
//! - `ports/` - `RetrievalGateApi` (inbound), `DocumentStore` (outbound)
//! - `adapters/` - filesystem and in-memory document stores
//! - `service.rs` - `DocumentVault`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::filesystem::FileSystemDocumentStore;
pub use adapters::memory::InMemoryDocumentStore;
pub use domain::entities::{ReleasedDocument, SignedDocument};
pub use domain::errors::{RetrievalError, StoreError};
pub use domain::naming::{storage_folder_name, validate_path_component};
pub use ports::inbound::RetrievalGateApi;
pub use ports::outbound::DocumentStore;
pub use service::DocumentVault;
