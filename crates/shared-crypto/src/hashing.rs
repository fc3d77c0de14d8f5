//! # SHA-256 Hashing
//!
//! Document fixity digests. A `DocumentHash` is always recomputed from the
//! bytes being checked; a stored hash is only ever the value compared against.

use crate::encoding::{decode_base64, encode_base64};
use crate::CryptoError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};

/// Hash algorithm identifier recorded in signature records.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// SHA-256 digest of a document's exact byte content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHash([u8; 32]);

impl DocumentHash {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Base64 form, as embedded in signature payloads.
    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }

    /// Parse the base64 form.
    pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
        let bytes = decode_base64(text)?;
        let digest: [u8; 32] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: 32,
                    actual: bytes.len(),
                })?;
        Ok(Self(digest))
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentHash({})", self.to_hex())
    }
}

/// Streaming SHA-256 hasher.
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> DocumentHash {
        DocumentHash(self.inner.finalize().into())
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256_hash(data: &[u8]) -> DocumentHash {
    DocumentHash(Sha256::digest(data).into())
}

/// Hash everything a reader yields.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<DocumentHash> {
    let mut hasher = Sha256Hasher::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}
