//! # Document Signing Service
//!
//! Application service that implements the `DocumentSigningApi` trait.
//!
//! ## Architecture
//!
//! - Owns the signer's key pair, constructed once and passed in explicitly
//! - Uses the outbound `Clock` port for signing timestamps
//! - Delegates hashing, payload construction and signature checks to the domain layer

use crate::domain::entities::{
    SignatureRecord, SignerIdentity, VerificationReport, VerificationStatus,
};
use crate::domain::errors::SigningError;
use crate::domain::signer::{format_timestamp, sign_document};
use crate::domain::verifier::{verify_document, verify_document_json};
use crate::ports::inbound::DocumentSigningApi;
use crate::ports::outbound::Clock;
use chrono::{DateTime, FixedOffset};
use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, KeyStore};
use tracing::info;

/// Document Signing Service.
pub struct DocumentSigningService<C: Clock> {
    keypair: Ed25519KeyPair,
    identity: SignerIdentity,
    clock: C,
}

impl<C: Clock> DocumentSigningService<C> {
    /// Create a new signing service.
    ///
    /// # Errors
    /// * `SigningError::EmptySignerName` - the identity has a blank name
    pub fn new(
        keypair: Ed25519KeyPair,
        identity: SignerIdentity,
        clock: C,
    ) -> Result<Self, SigningError> {
        if identity.name.trim().is_empty() {
            return Err(SigningError::EmptySignerName);
        }
        Ok(Self {
            keypair,
            identity,
            clock,
        })
    }

    /// Create a signing service with the private key from a key store.
    ///
    /// # Errors
    /// * `SigningError::KeyLoad` - the key store could not supply a valid key
    pub fn from_key_store<K: KeyStore + ?Sized>(
        store: &K,
        identity: SignerIdentity,
        clock: C,
    ) -> Result<Self, SigningError> {
        let keypair = store.signing_key()?;
        info!(
            "[ds-01] Loaded signing key for '{}' (public key {})",
            identity.name,
            keypair.public_key().to_base64()
        );
        Self::new(keypair, identity, clock)
    }

    /// Sign a document at an explicit instant.
    pub fn sign_at(
        &self,
        document: &[u8],
        instant: &DateTime<FixedOffset>,
    ) -> Result<SignatureRecord, SigningError> {
        sign_document(
            document,
            &self.keypair,
            &self.identity,
            &format_timestamp(instant),
        )
    }

    /// The identity written into records.
    pub fn identity(&self) -> &SignerIdentity {
        &self.identity
    }
}

impl<C: Clock> DocumentSigningApi for DocumentSigningService<C> {
    fn sign(&self, document: &[u8]) -> Result<SignatureRecord, SigningError> {
        self.sign_at(document, &self.clock.now())
    }

    fn verify(&self, document: &[u8], record: &SignatureRecord) -> VerificationStatus {
        verify_document(document, record, &self.keypair.public_key())
    }

    fn verify_report(&self, document: &[u8], record_bytes: &[u8]) -> VerificationReport {
        verify_document_json(document, record_bytes, &self.keypair.public_key())
    }

    fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }
}

// =============================================================================
// TESTS
// =============================================================================
