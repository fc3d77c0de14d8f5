//! # JSON File Registry Store
//!
//! Persists the registry as one JSON object (`id -> entry`).
//!
//! Writes go to `<file>.tmp`, are fsync'd and then renamed over the original,
//! so a crash leaves either the old or the new file, never a partial one.
//! Writers hold an in-process mutex and an exclusive file lock, and re-read the
//! file before inserting so entries committed by other processes are kept.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use super::lock::RegistryFileLock;
use crate::domain::entities::{RegistryEntry, VerificationId};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::RegistryStore;

type EntryMap = BTreeMap<VerificationId, RegistryEntry>;

/// File-backed registry for production.
pub struct JsonFileRegistryStore {
    path: PathBuf,
    lock_path: PathBuf,
    /// Entries seen so far. Append-only, so merging never loses data.
    cache: RwLock<EntryMap>,
    write_guard: Mutex<()>,
}

impl JsonFileRegistryStore {
    /// Open (or lazily create) the registry at `path`.
    ///
    /// Fails with `Corrupted` if the file exists but cannot be parsed; an
    /// unreadable registry is never silently replaced by an empty one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                RegistryError::Storage(format!("{}: {}", parent.display(), e))
            })?;
        }
        let lock_path = RegistryFileLock::path_for(&path);

        let entries = {
            let _flock = Self::lock_shared(&lock_path)?;
            Self::read_file(&path)?
        };

        if entries.is_empty() {
            tracing::info!("[ds-03] 📁 No existing registry entries at {}", path.display());
        } else {
            tracing::info!(
                "[ds-03] 💾 Loaded {} registry entries from {}",
                entries.len(),
                path.display()
            );
        }

        Ok(Self {
            path,
            lock_path,
            cache: RwLock::new(entries),
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_shared(lock_path: &Path) -> Result<RegistryFileLock, RegistryError> {
        RegistryFileLock::shared(lock_path)
            .map_err(|e| RegistryError::Storage(format!("{}: {}", lock_path.display(), e)))
    }

    fn lock_exclusive(lock_path: &Path) -> Result<RegistryFileLock, RegistryError> {
        RegistryFileLock::exclusive(lock_path)
            .map_err(|e| RegistryError::Storage(format!("{}: {}", lock_path.display(), e)))
    }

    fn read_file(path: &Path) -> Result<EntryMap, RegistryError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(EntryMap::new()),
            Err(e) => return Err(RegistryError::Storage(format!("{}: {}", path.display(), e))),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(EntryMap::new());
        }

        let raw: BTreeMap<String, RegistryEntry> = serde_json::from_slice(&bytes)
            .map_err(|e| RegistryError::Corrupted(format!("{}: {}", path.display(), e)))?;

        let mut entries = EntryMap::new();
        for (key, entry) in raw {
            if key != entry.verification_id.as_str() {
                return Err(RegistryError::Corrupted(format!(
                    "{}: key {} holds entry for {}",
                    path.display(),
                    key,
                    entry.verification_id
                )));
            }
            entries.insert(entry.verification_id.clone(), entry);
        }
        Ok(entries)
    }

    fn write_file(path: &Path, entries: &EntryMap) -> Result<(), RegistryError> {
        let storage = |e: std::io::Error| RegistryError::Storage(format!("{}: {}", path.display(), e));

        let raw: BTreeMap<&str, &RegistryEntry> =
            entries.iter().map(|(id, entry)| (id.as_str(), entry)).collect();
        let mut bytes = serde_json::to_vec_pretty(&raw)
            .map_err(|e| RegistryError::Storage(format!("serialize registry: {e}")))?;
        bytes.push(b'\n');

        let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        {
            let mut file = File::create(&tmp_path).map_err(storage)?;
            file.write_all(&bytes).map_err(storage)?;
            file.sync_all().map_err(storage)?;
        }
        fs::rename(&tmp_path, path).map_err(storage)?;

        #[cfg(unix)]
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Persist the rename itself.
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }

    /// Re-read the file and merge it into the cache.
    fn refresh(&self) -> Result<(), RegistryError> {
        let on_disk = {
            let _flock = Self::lock_shared(&self.lock_path)?;
            Self::read_file(&self.path)?
        };
        self.cache.write().extend(on_disk);
        Ok(())
    }
}

impl RegistryStore for JsonFileRegistryStore {
    fn insert_new(&self, entry: RegistryEntry) -> Result<(), RegistryError> {
        let _guard = self.write_guard.lock();
        let _flock = Self::lock_exclusive(&self.lock_path)?;

        let mut entries = Self::read_file(&self.path)?;
        if entries.contains_key(&entry.verification_id) {
            self.cache.write().extend(entries);
            return Err(RegistryError::DuplicateId(entry.verification_id.to_string()));
        }

        let id = entry.verification_id.clone();
        entries.insert(id.clone(), entry);
        Self::write_file(&self.path, &entries)?;

        tracing::debug!("[ds-03] Committed {} ({} entries)", id, entries.len());
        self.cache.write().extend(entries);
        Ok(())
    }

    fn get(&self, id: &VerificationId) -> Result<Option<RegistryEntry>, RegistryError> {
        if let Some(entry) = self.cache.read().get(id) {
            return Ok(Some(entry.clone()));
        }
        // Another process may have registered it since we last looked.
        self.refresh()?;
        Ok(self.cache.read().get(id).cloned())
    }

    fn len(&self) -> Result<usize, RegistryError> {
        self.refresh()?;
        Ok(self.cache.read().len())
    }
}
