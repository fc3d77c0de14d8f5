//! # Certificate Authority Service
//!
//! Holds the CA key pair, issuer identity and serial allocator for the
//! lifetime of the process.

use crate::domain::entities::{
    Certificate, CertificateIssuer, CertificateSubject, Validity,
};
use crate::domain::errors::CertificateError;
use crate::domain::issuance;
use crate::domain::serial::SerialNumberAllocator;
use crate::ports::inbound::CertificateAuthorityApi;
use chrono::{Datelike, Utc};
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, FileKeyStore, KeyStore};
use std::path::Path;
use tracing::info;

/// CA private key file name.
pub const CA_PRIVATE_KEY_FILE: &str = "ca_private.key";

/// CA public key file name.
pub const CA_PUBLIC_KEY_FILE: &str = "ca_public.key";

/// A certificate authority.
pub struct CertificateAuthority {
    keypair: Ed25519KeyPair,
    issuer: CertificateIssuer,
    serials: SerialNumberAllocator,
}

impl CertificateAuthority {
    /// Wrap existing CA key material.
    pub fn new(
        keypair: Ed25519KeyPair,
        issuer: CertificateIssuer,
        serials: SerialNumberAllocator,
    ) -> Self {
        Self {
            keypair,
            issuer,
            serials,
        }
    }

    /// Key ceremony: a fresh CA key pair.
    pub fn generate(issuer: CertificateIssuer) -> Self {
        info!("[ds-02] Generating new CA key pair for '{}'", issuer.name);
        Self::new(Ed25519KeyPair::generate(), issuer, SerialNumberAllocator::default())
    }

    /// Load the CA private key from a key store.
    pub fn from_key_store<K: KeyStore + ?Sized>(
        store: &K,
        issuer: CertificateIssuer,
        serials: SerialNumberAllocator,
    ) -> Result<Self, CertificateError> {
        let keypair = store.signing_key()?;
        info!(
            "[ds-02] Loaded CA key for '{}' (public key {})",
            issuer.name,
            keypair.public_key().to_base64()
        );
        Ok(Self::new(keypair, issuer, serials))
    }

    /// Key store layout for CA keys inside `dir`.
    pub fn key_store(dir: &Path) -> FileKeyStore {
        FileKeyStore::with_paths(dir.join(CA_PRIVATE_KEY_FILE), dir.join(CA_PUBLIC_KEY_FILE))
    }

    /// Persist the CA key pair.
    pub fn save_keys(&self, store: &FileKeyStore) -> Result<(), CertificateError> {
        store.write_keypair(&self.keypair)?;
        Ok(())
    }

    /// The issuer written into certificates.
    pub fn issuer(&self) -> &CertificateIssuer {
        &self.issuer
    }
}

impl CertificateAuthorityApi for CertificateAuthority {
    fn issue(
        &self,
        subject: CertificateSubject,
        validity: Validity,
        subject_public_key: &Ed25519PublicKey,
    ) -> Result<Certificate, CertificateError> {
        let serial = self.serials.allocate(Utc::now().year());
        let certificate = issuance::issue_certificate(
            serial,
            subject,
            self.issuer.clone(),
            validity,
            subject_public_key,
            &self.keypair,
        )?;
        info!(
            "[ds-02] Certificate {} issued to '{}' until {}",
            certificate.serial_number, certificate.subject.name, certificate.validity.not_after
        );
        Ok(certificate)
    }

    fn verify_certificate(&self, certificate: &Certificate) -> bool {
        issuance::verify_certificate(certificate, &self.keypair.public_key())
    }

    fn attests(&self, certificate: &Certificate, signer_public_key: &Ed25519PublicKey) -> bool {
        issuance::attests(certificate, &self.keypair.public_key(), signer_public_key)
    }

    fn ca_public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }
}
