//! # Outbound Ports (Driven Ports)

use crate::domain::entities::{RegistryEntry, VerificationId};
use crate::domain::errors::RegistryError;

/// Durable id -> entry storage.
///
/// Implementations must be safe to share between threads; `insert_new` must be
/// atomic with respect to other inserts (check-then-write under one lock).
pub trait RegistryStore: Send + Sync {
    /// Insert unless the id already exists.
    fn insert_new(&self, entry: RegistryEntry) -> Result<(), RegistryError>;

    fn get(&self, id: &VerificationId) -> Result<Option<RegistryEntry>, RegistryError>;

    fn len(&self) -> Result<usize, RegistryError>;

    fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }
}
