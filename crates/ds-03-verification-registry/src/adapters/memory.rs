//! In-memory registry store for tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::entities::{RegistryEntry, VerificationId};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::RegistryStore;

#[derive(Default)]
pub struct InMemoryRegistryStore {
    entries: RwLock<HashMap<VerificationId, RegistryEntry>>,
}

impl InMemoryRegistryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryStore for InMemoryRegistryStore {
    fn insert_new(&self, entry: RegistryEntry) -> Result<(), RegistryError> {
        let mut entries = self.entries.write();
        if entries.contains_key(&entry.verification_id) {
            return Err(RegistryError::DuplicateId(entry.verification_id.to_string()));
        }
        entries.insert(entry.verification_id.clone(), entry);
        Ok(())
    }

    fn get(&self, id: &VerificationId) -> Result<Option<RegistryEntry>, RegistryError> {
        Ok(self.entries.read().get(id).cloned())
    }

    fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.entries.read().len())
    }
}
