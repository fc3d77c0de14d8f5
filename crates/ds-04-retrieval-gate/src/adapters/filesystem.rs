//! # Filesystem Document Store
//!
//! Layout under the uploads root:
//!
//! ```text
//! <root>/<YYYYmmdd_HHMMSS>_<6 hex>/<filename>
//! <root>/<YYYYmmdd_HHMMSS>_<6 hex>/<filename>.sig.json
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use ds_01_document_signing::{SignatureRecord, SIDECAR_SUFFIX};

use crate::domain::errors::StoreError;
use crate::domain::naming::{storage_folder_name, validate_path_component};
use crate::ports::outbound::DocumentStore;

/// Folder names drawn before giving up on a collision.
const MAX_FOLDER_ATTEMPTS: usize = 5;

pub struct FileSystemDocumentStore {
    root: PathBuf,
}

impl FileSystemDocumentStore {
    /// Use (and create if needed) `root` as the uploads directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        tracing::info!("[ds-04] 📁 Document store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a stored document. Both components are validated.
    pub fn document_path(&self, location: &str, filename: &str) -> Result<PathBuf, StoreError> {
        validate_path_component(location)?;
        validate_path_component(filename)?;
        Ok(self.root.join(location).join(filename))
    }

    /// Path of a stored document's signature record.
    pub fn sidecar_path(&self, location: &str, filename: &str) -> Result<PathBuf, StoreError> {
        validate_path_component(location)?;
        validate_path_component(filename)?;
        Ok(self
            .root
            .join(location)
            .join(format!("{filename}{SIDECAR_SUFFIX}")))
    }

    fn create_folder(&self) -> Result<String, StoreError> {
        for _ in 0..MAX_FOLDER_ATTEMPTS {
            let name = storage_folder_name(&Utc::now());
            let path = self.root.join(&name);
            match fs::create_dir(&path) {
                Ok(()) => return Ok(name),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(&path, e)),
            }
        }
        Err(StoreError::Io(format!(
            "no free storage folder under {} after {} attempts",
            self.root.display(),
            MAX_FOLDER_ATTEMPTS
        )))
    }

    fn write_artifacts(
        &self,
        location: &str,
        filename: &str,
        document: &[u8],
        sidecar: &[u8],
    ) -> Result<(), StoreError> {
        write_synced(&self.document_path(location, filename)?, document)?;
        write_synced(&self.sidecar_path(location, filename)?, sidecar)
    }

    fn read(path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
            _ => io_error(path, e),
        })
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {}", path.display(), err))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(path).map_err(|e| io_error(path, e))?;
    file.write_all(bytes).map_err(|e| io_error(path, e))?;
    file.sync_all().map_err(|e| io_error(path, e))
}

impl DocumentStore for FileSystemDocumentStore {
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

        let location = self.create_folder()?;
        if let Err(e) = self.write_artifacts(&location, filename, document, sidecar.as_bytes()) {
            if let Err(cleanup) = self.discard(&location) {
                tracing::warn!(
                    "[ds-04] Could not remove partial folder {}: {}",
                    location,
                    cleanup
                );
            }
            return Err(e);
        }

        tracing::debug!(
            "[ds-04] Stored {} ({} bytes) in {}",
            filename,
            document.len(),
            location
        );
        Ok(location)
    }

    fn load_document(&self, location: &str, filename: &str) -> Result<Vec<u8>, StoreError> {
        Self::read(&self.document_path(location, filename)?)
    }

    fn load_signature_record(
        &self,
        location: &str,
        filename: &str,
    ) -> Result<Vec<u8>, StoreError> {
        Self::read(&self.sidecar_path(location, filename)?)
    }

    fn discard(&self, location: &str) -> Result<(), StoreError> {
        validate_path_component(location)?;
        let path = self.root.join(location);
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                tracing::debug!("[ds-04] Discarded {}", location);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
