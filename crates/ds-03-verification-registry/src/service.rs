//! # Verification Registry Service
//!
//! Application service implementing `VerificationRegistryApi` on top of any
//! `RegistryStore`.

use crate::domain::entities::{RegistryEntry, VerificationId};
use crate::domain::errors::RegistryError;
use crate::ports::inbound::VerificationRegistryApi;
use crate::ports::outbound::RegistryStore;

/// Fresh ids drawn before `register_with_fresh_id` gives up.
///
/// A collision between two 128-bit random ids is not expected in practice;
/// repeated collisions point at a broken RNG or store.
pub const MAX_ID_ATTEMPTS: usize = 3;

pub struct VerificationRegistry<S: RegistryStore> {
    store: S,
}

impl<S: RegistryStore> VerificationRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of registered documents.
    pub fn len(&self) -> Result<usize, RegistryError> {
        self.store.len()
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        self.store.is_empty()
    }
}

impl<S: RegistryStore> VerificationRegistryApi for VerificationRegistry<S> {
    fn issue_id(&self) -> VerificationId {
        VerificationId::generate()
    }

    fn register(&self, entry: RegistryEntry) -> Result<(), RegistryError> {
        let id = entry.verification_id.clone();
        match self.store.insert_new(entry) {
            Ok(()) => {
                tracing::info!("[ds-03] ✅ Registered verification id {}", id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[ds-03] Registration of {} failed: {}", id, e);
                Err(e)
            }
        }
    }

    fn register_with_fresh_id(
        &self,
        build: &dyn Fn(VerificationId) -> RegistryEntry,
    ) -> Result<RegistryEntry, RegistryError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let entry = build(self.issue_id());
            match self.register(entry.clone()) {
                Ok(()) => return Ok(entry),
                Err(RegistryError::DuplicateId(id)) => {
                    tracing::warn!(
                        "[ds-03] Id collision on {} (attempt {}/{})",
                        id,
                        attempt,
                        MAX_ID_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Err(RegistryError::IdAllocationFailed(MAX_ID_ATTEMPTS))
    }

    fn lookup(&self, verification_id: &str) -> Result<RegistryEntry, RegistryError> {
        let not_found = || RegistryError::NotFound(verification_id.chars().take(64).collect());

        let id = VerificationId::parse(verification_id).map_err(|_| not_found())?;
        self.store.get(&id)?.ok_or_else(not_found)
    }
}
