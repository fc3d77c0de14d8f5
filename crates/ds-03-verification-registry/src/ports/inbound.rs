//! # Inbound Ports (Driving Ports)
//!
//! API exposed to the retrieval gate and the CLI.

use crate::domain::entities::{RegistryEntry, VerificationId};
use crate::domain::errors::RegistryError;

/// Verification registry API.
pub trait VerificationRegistryApi: Send + Sync {
    /// Draw a fresh, unguessable id.
    fn issue_id(&self) -> VerificationId;

    /// Store `entry` under its id.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if the id is already present; the existing entry is untouched
    /// - `Storage` if the entry could not be made durable
    fn register(&self, entry: RegistryEntry) -> Result<(), RegistryError>;

    /// Issue an id, build the entry for it and register it, drawing a new id
    /// if the first one collides.
    fn register_with_fresh_id(
        &self,
        build: &dyn Fn(VerificationId) -> RegistryEntry,
    ) -> Result<RegistryEntry, RegistryError>;

    /// Look up raw user-supplied text.
    ///
    /// Malformed ids are reported as `NotFound`.
    fn lookup(&self, verification_id: &str) -> Result<RegistryEntry, RegistryError>;
}
