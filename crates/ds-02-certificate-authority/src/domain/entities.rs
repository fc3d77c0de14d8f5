//! # Domain Entities
//!
//! The mini certificate and its parts.

use super::errors::CertificateError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use shared_crypto::{decode_base64, Ed25519PublicKey};
use shared_types::{Canonical, CanonicalError, CanonicalObject};

/// Version label of issued certificates.
pub const CERTIFICATE_VERSION: &str = "Mini X.509 v1";

/// Field that carries the CA signature and is excluded from the signed payload.
const CA_SIGNATURE_FIELD: &str = "ca_signature";

/// Identity the certificate is issued to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateSubject {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Organization
    pub organization: String,
}

/// The issuing authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateIssuer {
    /// Authority name
    pub name: String,
    /// Country code
    pub country: String,
}

/// Validity window, stored as RFC 3339 strings exactly as issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Validity {
    /// Window start
    pub not_before: String,
    /// Window end
    pub not_after: String,
}

impl Validity {
    /// Build a window, rejecting one that ends before it starts.
    pub fn new(not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> Result<Self, CertificateError> {
        let window = Self {
            not_before: not_before.to_rfc3339_opts(SecondsFormat::Secs, true),
            not_after: not_after.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        if not_after <= not_before {
            return Err(CertificateError::InvalidValidity {
                not_before: window.not_before,
                not_after: window.not_after,
            });
        }
        Ok(window)
    }

    /// Whether `instant` falls inside the window.
    ///
    /// Bounds that do not parse as RFC 3339 make this `false`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let parse = |s: &str| DateTime::parse_from_rfc3339(s).ok();
        match (parse(&self.not_before), parse(&self.not_after)) {
            (Some(start), Some(end)) => start <= instant && instant <= end,
            _ => false,
        }
    }
}

/// A CA-signed attestation that `public_key` belongs to `subject`.
///
/// Fields the CA did not sign are refused when parsing.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certificate {
    /// Format label
    pub version: String,
    /// Serial number assigned by the issuing CA
    pub serial_number: String,
    /// Who the key belongs to
    pub subject: CertificateSubject,
    /// Who attests to it
    pub issuer: CertificateIssuer,
    /// Validity window
    pub validity: Validity,
    /// Base64 of the subject's raw Ed25519 public key
    pub public_key: String,
    /// Algorithm of `ca_signature`
    pub signature_algorithm: String,
    /// CA signature over every other field
    #[serde_as(as = "Base64")]
    pub ca_signature: Vec<u8>,
}

impl Certificate {
    /// Canonical object of every field, signature included.
    pub fn to_canonical_full(&self) -> Result<CanonicalObject, CanonicalError> {
        let subject = CanonicalObject::from_fields([
            ("name", self.subject.name.as_str()),
            ("email", self.subject.email.as_str()),
            ("organization", self.subject.organization.as_str()),
        ])?;
        let issuer = CanonicalObject::from_fields([
            ("name", self.issuer.name.as_str()),
            ("country", self.issuer.country.as_str()),
        ])?;
        let validity = CanonicalObject::from_fields([
            ("not_before", self.validity.not_before.as_str()),
            ("not_after", self.validity.not_after.as_str()),
        ])?;

        let mut object = CanonicalObject::new();
        object.insert("version", self.version.as_str())?;
        object.insert("serial_number", self.serial_number.as_str())?;
        object.insert("subject", subject)?;
        object.insert("issuer", issuer)?;
        object.insert("validity", validity)?;
        object.insert("public_key", self.public_key.as_str())?;
        object.insert("signature_algorithm", self.signature_algorithm.as_str())?;
        object.insert(
            CA_SIGNATURE_FIELD,
            shared_crypto::encode_base64(&self.ca_signature),
        )?;
        Ok(object)
    }

    /// Decode the subject's public key.
    pub fn subject_public_key(&self) -> Result<Ed25519PublicKey, CertificateError> {
        let bytes =
            decode_base64(&self.public_key).map_err(|_| CertificateError::MalformedPublicKey)?;
        Ed25519PublicKey::from_slice(&bytes).map_err(|_| CertificateError::MalformedPublicKey)
    }
}

/// The signed payload: the full record with `ca_signature` stripped.
impl Canonical for Certificate {
    fn to_canonical(&self) -> Result<CanonicalObject, CanonicalError> {
        let mut object = self.to_canonical_full()?;
        object
            .remove(CA_SIGNATURE_FIELD)
            .ok_or_else(|| CanonicalError::MissingField(CA_SIGNATURE_FIELD.to_string()))?;
        Ok(object)
    }
}
