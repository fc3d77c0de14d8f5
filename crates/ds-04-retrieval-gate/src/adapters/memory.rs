//! In-memory document store for tests.

use std::collections::HashMap;

use chrono::Utc;
use ds_01_document_signing::SignatureRecord;
use parking_lot::RwLock;

use crate::domain::errors::StoreError;
use crate::domain::naming::{storage_folder_name, validate_path_component};
use crate::ports::outbound::DocumentStore;

#[derive(Clone)]
struct StoredArtifacts {
    filename: String,
    document: Option<Vec<u8>>,
    record: Option<Vec<u8>>,
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    folders: RwLock<HashMap<String, StoredArtifacts>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite stored bytes in place, as an attacker with storage access could.
    pub fn replace_document(&self, location: &str, bytes: Vec<u8>) -> bool {
        self.update(location, |a| a.document = Some(bytes))
    }

    pub fn replace_signature_record(&self, location: &str, bytes: Vec<u8>) -> bool {
        self.update(location, |a| a.record = Some(bytes))
    }

    pub fn remove_document(&self, location: &str) -> bool {
        self.update(location, |a| a.document = None)
    }

    /// Number of stored folders.
    pub fn len(&self) -> usize {
        self.folders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.read().is_empty()
    }

    pub fn remove_signature_record(&self, location: &str) -> bool {
        self.update(location, |a| a.record = None)
    }

    fn update(&self, location: &str, f: impl FnOnce(&mut StoredArtifacts)) -> bool {
        match self.folders.write().get_mut(location) {
            Some(artifacts) => {
                f(artifacts);
                true
            }
            None => false,
        }
    }

    fn load(
        &self,
        location: &str,
        filename: &str,
        pick: impl Fn(&StoredArtifacts) -> Option<&Vec<u8>>,
    ) -> Result<Vec<u8>, StoreError> {
        validate_path_component(location)?;
        validate_path_component(filename)?;
        let folders = self.folders.read();
        folders
            .get(location)
            .filter(|a| a.filename == filename)
            .and_then(|a| pick(a).cloned())
            .ok_or_else(|| StoreError::NotFound(format!("{location}/{filename}")))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn store(
        &self,
        filename: &str,
        document: &[u8],
        record: &SignatureRecord,
    ) -> Result<String, StoreError> {
        validate_path_component(filename)?;
        let sidecar = record
            .to_json_pretty()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut folders = self.folders.write();
        let mut location = storage_folder_name(&Utc::now());
        while folders.contains_key(&location) {
            location = storage_folder_name(&Utc::now());
        }
        folders.insert(
            location.clone(),
            StoredArtifacts {
                filename: filename.to_owned(),
                document: Some(document.to_vec()),
                record: Some(sidecar.into_bytes()),
            },
        );
        Ok(location)
    }

    fn load_document(&self, location: &str, filename: &str) -> Result<Vec<u8>, StoreError> {
        self.load(location, filename, |a| a.document.as_ref())
    }

    fn load_signature_record(
        &self,
        location: &str,
        filename: &str,
    ) -> Result<Vec<u8>, StoreError> {
        self.load(location, filename, |a| a.record.as_ref())
    }

    fn discard(&self, location: &str) -> Result<(), StoreError> {
        validate_path_component(location)?;
        self.folders.write().remove(location);
        Ok(())
    }
}
