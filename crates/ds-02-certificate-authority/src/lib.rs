//! # Certificate Authority Subsystem (ds-02)
//!
//! A one-level trust chain: the CA's Ed25519 key signs a small certificate
//! binding a subject's identity to the subject's public key.
//!
//! ## Certificate layout
//!
//! | Field | Signed | Notes |
//! |-------|--------|-------|
//! | `version` | yes | `Mini X.509 v1` |
//! | `serial_number` | yes | `<prefix>-<year>-<seq>` |
//! | `subject` | yes | name, email, organization |
//! | `issuer` | yes | name, country |
//! | `validity` | yes | `not_before`, `not_after` (RFC 3339) |
//! | `public_key` | yes | base64 of the subject's raw key |
//! | `signature_algorithm` | yes | `Ed25519` |
//! | `ca_signature` | no | signature over all of the above |
//!
//! ## Out of scope
//!
//! No intermediate CAs, no revocation. Expiry is exposed through
//! [`Validity::contains`] for callers to check; verification does not enforce it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::certificate_file::{load_certificate, save_certificate, CERTIFICATE_SUFFIX};
pub use domain::entities::{
    Certificate, CertificateIssuer, CertificateSubject, Validity, CERTIFICATE_VERSION,
};
pub use domain::errors::CertificateError;
pub use domain::issuance::{attests, issue_certificate, verify_certificate};
pub use domain::serial::SerialNumberAllocator;
pub use ports::inbound::CertificateAuthorityApi;
pub use service::{CertificateAuthority, CA_PRIVATE_KEY_FILE, CA_PUBLIC_KEY_FILE};
