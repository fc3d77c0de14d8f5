//! # Shared Crypto - Hashing and Key Material
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Document fixity |
//! | `signatures` | Ed25519 | Document and certificate signing |
//! | `keys` | raw 32-byte files | Key store for signer and CA keys |
//! | `encoding` | base64 (standard, padded) | Binary values in textual records |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Key material**: Seeds are zeroized on drop and never appear in `Debug` output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod signatures;

// Re-exports
pub use encoding::{decode_base64, encode_base64};
pub use errors::CryptoError;
pub use hashing::{hash_reader, sha256_hash, DocumentHash, Sha256Hasher, HASH_ALGORITHM};
pub use keys::{FileKeyStore, KeyStore, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, SIGNATURE_ALGORITHM};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
