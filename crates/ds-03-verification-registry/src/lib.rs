//! # Verification Registry (ds-03)
//!
//! Maps an unguessable verification id to the metadata of a signed document.
//! The id is the only credential needed to look a document up, so it comes
//! from the OS CSPRNG and is never derived from the filename, signer or time.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique Ids | Registering an existing id fails with `DuplicateId` |
//! | 2 | Append Only | Entries are never mutated or deleted |
//! | 3 | No Lost Writes | Concurrent registrations are serialized |
//! | 4 | Durable | A committed entry survives restart; the file is never partially written |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `VerificationId`, `RegistryEntry`, errors
//! - `ports/` - `VerificationRegistryApi` (inbound), `RegistryStore` (outbound)
//! - `adapters/` - in-memory store, JSON file store, file lock
//! - `service.rs` - `VerificationRegistry`
//!
//! ## Usage
//!
//! ```ignore
//! use ds_03_verification_registry::{JsonFileRegistryStore, VerificationRegistry};
//!
//! let registry = VerificationRegistry::new(JsonFileRegistryStore::open("registry.json")?);
//! let entry = registry.register_with_fresh_id(&|id| entry_for(id))?;
//! let found = registry.lookup(entry.verification_id.as_str())?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::file::JsonFileRegistryStore;
pub use adapters::memory::InMemoryRegistryStore;
pub use domain::entities::{signed_filename_for, RegistryEntry, VerificationId};
pub use domain::errors::RegistryError;
pub use ports::inbound::VerificationRegistryApi;
pub use ports::outbound::RegistryStore;
pub use service::{VerificationRegistry, MAX_ID_ATTEMPTS};
