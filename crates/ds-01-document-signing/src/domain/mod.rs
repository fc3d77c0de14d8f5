//! # Domain Layer
//!
//! Pure signing and verification logic with no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod signer;
pub mod verifier;
