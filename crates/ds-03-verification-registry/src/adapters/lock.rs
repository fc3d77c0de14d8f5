//! # File Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows)
//! so that several processes can share one registry file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Advisory lock on a sidecar `.lock` file, released on drop (RAII).
///
/// Blocks until the lock is available. Locks are per open file, so two guards
/// in the same process also exclude each other.
#[derive(Debug)]
pub struct RegistryFileLock {
    file: File,
    path: PathBuf,
}

impl RegistryFileLock {
    /// Lock file that guards `data_path`.
    pub fn path_for(data_path: &Path) -> PathBuf {
        let mut name = data_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".lock");
        data_path.with_file_name(name)
    }

    /// Acquire an exclusive lock (writers).
    pub fn exclusive(lock_path: &Path) -> io::Result<Self> {
        let file = Self::open(lock_path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }

    /// Acquire a shared lock (readers).
    pub fn shared(lock_path: &Path) -> io::Result<Self> {
        let file = Self::open(lock_path)?;
        FileExt::lock_shared(&file)?;
        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(lock_path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .read(true)
            .open(lock_path)
    }
}

impl Drop for RegistryFileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("[ds-03] Failed to release {}: {}", self.path.display(), e);
        }
    }
}
