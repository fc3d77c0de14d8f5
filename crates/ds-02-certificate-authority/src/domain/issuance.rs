//! # Issuance and Verification
//!
//! Issuance canonicalizes every field except `ca_signature`, signs those bytes
//! with the CA key and stores the result in `ca_signature`. Verification strips
//! `ca_signature`, rebuilds the same bytes and checks them against the CA
//! public key. Any failure on the way answers `false`.

use super::entities::{
    Certificate, CertificateIssuer, CertificateSubject, Validity, CERTIFICATE_VERSION,
};
use super::errors::CertificateError;
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, SIGNATURE_ALGORITHM};
use shared_types::Canonical;
use tracing::{debug, warn};

/// Issue a certificate binding `subject_public_key` to `subject`.
pub fn issue_certificate(
    serial_number: String,
    subject: CertificateSubject,
    issuer: CertificateIssuer,
    validity: Validity,
    subject_public_key: &Ed25519PublicKey,
    ca_keypair: &Ed25519KeyPair,
) -> Result<Certificate, CertificateError> {
    let mut certificate = Certificate {
        version: CERTIFICATE_VERSION.to_string(),
        serial_number,
        subject,
        issuer,
        validity,
        public_key: subject_public_key.to_base64(),
        signature_algorithm: SIGNATURE_ALGORITHM.to_string(),
        ca_signature: Vec::new(),
    };

    let payload = certificate.canonical_bytes()?;
    certificate.ca_signature = ca_keypair.sign(&payload).as_bytes().to_vec();

    debug!(
        "[ds-02] Issued certificate {} to '{}'",
        certificate.serial_number, certificate.subject.name
    );
    Ok(certificate)
}

/// Check a certificate's CA signature. Fails closed.
pub fn verify_certificate(certificate: &Certificate, ca_public_key: &Ed25519PublicKey) -> bool {
    if certificate.signature_algorithm != SIGNATURE_ALGORITHM {
        warn!(
            "[ds-02] Certificate {} uses unsupported algorithm {}",
            certificate.serial_number, certificate.signature_algorithm
        );
        return false;
    }

    let payload = match certificate.canonical_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("[ds-02] Certificate payload could not be rebuilt: {}", e);
            return false;
        }
    };

    let signature = match Ed25519Signature::from_slice(&certificate.ca_signature) {
        Ok(sig) => sig,
        Err(_) => {
            warn!(
                "[ds-02] Certificate {} has a malformed CA signature",
                certificate.serial_number
            );
            return false;
        }
    };

    let valid = ca_public_key.verify(&payload, &signature).is_ok();
    if !valid {
        warn!(
            "[ds-02] CA signature rejected for certificate {}",
            certificate.serial_number
        );
    }
    valid
}

/// Whether the certificate verifies under the CA key and names exactly `signer_public_key`.
pub fn attests(
    certificate: &Certificate,
    ca_public_key: &Ed25519PublicKey,
    signer_public_key: &Ed25519PublicKey,
) -> bool {
    if !verify_certificate(certificate, ca_public_key) {
        return false;
    }
    match certificate.subject_public_key() {
        Ok(key) => key == *signer_public_key,
        Err(_) => false,
    }
}
