//! # Domain Layer
//!
//! Certificate model, issuance and verification. No I/O.

pub mod entities;
pub mod errors;
pub mod issuance;
pub mod serial;
