//! # Key Store
//!
//! Raw key files: a 32-byte seed for the private key and a 32-byte curve
//! point for the public key. Nothing else is accepted.

use crate::signatures::{Ed25519KeyPair, Ed25519PublicKey};
use crate::CryptoError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use zeroize::Zeroizing;

/// Default private key file name.
pub const PRIVATE_KEY_FILE: &str = "private.key";

/// Default public key file name.
pub const PUBLIC_KEY_FILE: &str = "public.key";

/// Supplies key material on demand.
pub trait KeyStore: Send + Sync {
    /// Load the private signing key.
    fn signing_key(&self) -> Result<Ed25519KeyPair, CryptoError>;

    /// Load the public verification key.
    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError>;
}

/// Key store backed by two raw key files.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    private_path: PathBuf,
    public_path: PathBuf,
}

impl FileKeyStore {
    /// Key store using `private.key` / `public.key` inside `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::with_paths(dir.join(PRIVATE_KEY_FILE), dir.join(PUBLIC_KEY_FILE))
    }

    /// Key store using explicit file paths.
    pub fn with_paths<P: Into<PathBuf>, Q: Into<PathBuf>>(private_path: P, public_path: Q) -> Self {
        Self {
            private_path: private_path.into(),
            public_path: public_path.into(),
        }
    }

    /// Path of the private key file.
    pub fn private_path(&self) -> &Path {
        &self.private_path
    }

    /// Path of the public key file.
    pub fn public_path(&self) -> &Path {
        &self.public_path
    }

    /// Whether both key files are present.
    pub fn exists(&self) -> bool {
        self.private_path.is_file() && self.public_path.is_file()
    }

    /// Write a keypair to both files, creating the parent directory.
    ///
    /// The private key file is created with mode 0600 on Unix.
    pub fn write_keypair(&self, keypair: &Ed25519KeyPair) -> Result<(), CryptoError> {
        let seed = keypair.to_seed();
        write_key_file(&self.private_path, seed.as_slice(), true)?;
        write_key_file(&self.public_path, keypair.public_key().as_bytes(), false)?;
        info!(
            "[shared-crypto] Wrote keypair to {} / {}",
            self.private_path.display(),
            self.public_path.display()
        );
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn signing_key(&self) -> Result<Ed25519KeyPair, CryptoError> {
        let bytes = Zeroizing::new(read_key_file(&self.private_path)?);
        Ed25519KeyPair::from_seed_slice(&bytes)
            .map_err(|e| key_load_error(&self.private_path, &e.to_string()))
    }

    fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        let bytes = read_key_file(&self.public_path)?;
        Ed25519PublicKey::from_slice(&bytes)
            .map_err(|e| key_load_error(&self.public_path, &e.to_string()))
    }
}

fn key_load_error(path: &Path, reason: &str) -> CryptoError {
    CryptoError::KeyLoad(format!("{}: {}", path.display(), reason))
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, CryptoError> {
    fs::read(path).map_err(|e| key_load_error(path, &e.to_string()))
}

fn write_key_file(path: &Path, bytes: &[u8], secret: bool) -> Result<(), CryptoError> {
    let persist = |e: std::io::Error| CryptoError::KeyPersist(format!("{}: {}", path.display(), e));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(persist)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    if secret {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = secret;

    let mut file = options.open(path).map_err(persist)?;
    // `mode` only applies on creation; tighten a file that already existed.
    #[cfg(unix)]
    if secret {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600)).map_err(persist)?;
    }
    file.write_all(bytes).map_err(persist)?;
    file.sync_all().map_err(persist)?;
    Ok(())
}
