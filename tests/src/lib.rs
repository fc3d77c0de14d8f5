//! # Doc-Seal Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Cross-crate flows
//! │   ├── flows.rs          # sign -> register -> retrieve, restart, interop
//! │   └── concurrency.rs    # concurrent registration and retrieval
//! │
//! └── exploits/         # Attack simulations
//!     ├── forgery.rs        # forged signers, substituted keys, replayed records
//!     ├── tampering.rs      # storage tampering after signing
//!     └── certificates.rs   # certificate field and key substitution
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ds-tests
//!
//! # By category
//! cargo test -p ds-tests integration::
//! cargo test -p ds-tests exploits::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
