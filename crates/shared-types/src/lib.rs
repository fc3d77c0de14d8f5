//! # Shared Types Crate
//!
//! The canonical record encoding used by every signing and verification path.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: signer, verifier and certificate authority all
//!   produce their signed bytes through [`CanonicalObject::to_bytes`].
//! - **Order Independence**: the bytes depend only on the logical content of a
//!   record, never on the order fields were inserted.
//! - **Versioned**: [`CANONICAL_FORMAT_VERSION`] names the byte form. Adding or
//!   removing a signed field is a breaking format change.

pub mod canonical;
pub mod errors;

pub use canonical::{Canonical, CanonicalObject, CanonicalValue, CANONICAL_FORMAT_VERSION};
pub use errors::CanonicalError;
