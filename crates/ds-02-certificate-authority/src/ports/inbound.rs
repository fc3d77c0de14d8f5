//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{Certificate, CertificateSubject, Validity};
use crate::domain::errors::CertificateError;
use shared_crypto::Ed25519PublicKey;

/// Certificate Authority API.
pub trait CertificateAuthorityApi: Send + Sync {
    /// Issue a certificate for `subject_public_key` valid over `validity`.
    fn issue(
        &self,
        subject: CertificateSubject,
        validity: Validity,
        subject_public_key: &Ed25519PublicKey,
    ) -> Result<Certificate, CertificateError>;

    /// Check a certificate against this authority's public key.
    fn verify_certificate(&self, certificate: &Certificate) -> bool;

    /// Whether this authority vouches for `signer_public_key` through `certificate`.
    fn attests(&self, certificate: &Certificate, signer_public_key: &Ed25519PublicKey) -> bool;

    /// This authority's public key.
    fn ca_public_key(&self) -> Ed25519PublicKey;
}
