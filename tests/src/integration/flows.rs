//! # Integration Flows
//!
//! Signing, registration, storage and retrieval working together:
//!
//! 1. **Sign -> Register -> Retrieve**: the happy path on real files
//! 2. **Restart**: entries and documents survive reopening everything
//! 3. **Interop**: sidecars written by the earlier Python service verify unchanged
//! 4. **Trust path**: a CA certificate attests to the signing key

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use ds_01_document_signing::{
        sign_document, verify_document, verify_document_json, DocumentSigningApi,
        SignatureRecord, SignerIdentity, VerificationStatus,
    };
    use ds_02_certificate_authority::{
        attests, CertificateAuthority, CertificateAuthorityApi, CertificateIssuer,
        CertificateSubject, Validity,
    };
    use ds_03_verification_registry::VerificationRegistryApi;
    use ds_04_retrieval_gate::{RetrievalError, RetrievalGateApi};
    use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};
    use shared_types::Canonical;

    use crate::fixtures::{file_vault, FIXED_RECORD_TIMESTAMP, HELLO_DOC};

    /// Sidecar as written by the Python service (`json.dump(..., indent=2)`)
    /// for `HELLO_DOC`, signer "Alice", seed `[7; 32]`.
    const PYTHON_SIDECAR: &str = r#"{
  "algorithm": "Ed25519",
  "hash_algorithm": "SHA-256",
  "document_hash": "HsGgJn4z0q+N4w/agU35FViegrjhHdDl0KLFH468w1g=",
  "timestamp": "2026-01-05T10:00:00.000000+07:00",
  "signature": "VYTLFtzLWUpYsIK/6p+A9jTiP/1I8Tvf3AsHiLoTyFlNInhuUcC8JKYgWCCJpHGIrIUG4CpTG3E8aXQiRINaBA==",
  "signer": {
    "name": "Alice",
    "system": "Digital Signature System v1"
  }
}"#;

    const PYTHON_PUBLIC_KEY: &str = "6kpsY+KcUgq+9VB7Ey7F+ZVHdq6+vnuSQh7qaRRG0iw=";

    // =========================================================================
    // SIGN -> REGISTER -> RETRIEVE
    // =========================================================================

    #[test]
    fn test_hello_doc_end_to_end() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);

        let signed = vault.sign_and_register("hello-doc.txt", HELLO_DOC).unwrap();
        assert_eq!(signed.record.timestamp, FIXED_RECORD_TIMESTAMP);
        assert_eq!(signed.entry.signer, "Alice");
        assert_eq!(
            verify_document(HELLO_DOC, &signed.record, &vault.signer().public_key()),
            VerificationStatus::Valid
        );

        let released = vault.retrieve(signed.verification_id()).unwrap();
        assert_eq!(released.bytes, HELLO_DOC);

        // Flip one bit in the stored copy.
        let path = vault
            .store()
            .document_path(&signed.entry.storage_location, &signed.entry.filename)
            .unwrap();
        let mut bytes = fs::read(&path).unwrap();
        bytes[0] ^= 0b0000_0001;
        fs::write(&path, &bytes).unwrap();

        let err = vault.retrieve(signed.verification_id()).unwrap_err();
        assert_eq!(
            err,
            RetrievalError::DocumentTampered {
                verification_id: signed.verification_id().to_string()
            }
        );
        // Metadata stays visible; only the bytes are withheld.
        assert_eq!(vault.inspect(signed.verification_id()).unwrap(), signed.entry);
    }

    #[test]
    fn test_every_retrieval_reverifies() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let signed = vault.sign_and_register("a.txt", b"original").unwrap();
        let path = vault
            .store()
            .document_path(&signed.entry.storage_location, "a.txt")
            .unwrap();

        assert!(vault.retrieve(signed.verification_id()).is_ok());
        fs::write(&path, b"modified").unwrap();
        assert!(vault.retrieve(signed.verification_id()).is_err());
        // Restoring the exact bytes makes it releasable again: nothing is cached.
        fs::write(&path, b"original").unwrap();
        assert!(vault.retrieve(signed.verification_id()).is_ok());
    }

    #[test]
    fn test_registry_and_documents_survive_restart() {
        let dir = TempDir::new().unwrap();
        let ids: Vec<String> = {
            let vault = file_vault(dir.path(), 7);
            (0..5)
                .map(|i| {
                    let name = format!("doc-{i}.txt");
                    vault
                        .sign_and_register(&name, name.as_bytes())
                        .unwrap()
                        .verification_id()
                        .to_string()
                })
                .collect()
        };

        let reopened = file_vault(dir.path(), 7);
        for (i, id) in ids.iter().enumerate() {
            let released = reopened.retrieve(id).unwrap();
            assert_eq!(released.bytes, format!("doc-{i}.txt").as_bytes());
        }
        assert_eq!(reopened.registry().len().unwrap(), 5);
    }

    #[test]
    fn test_same_document_signed_twice_gets_two_ids() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let first = vault.sign_and_register("same.txt", HELLO_DOC).unwrap();
        let second = vault.sign_and_register("same.txt", HELLO_DOC).unwrap();

        assert_ne!(first.verification_id(), second.verification_id());
        assert_ne!(first.entry.storage_location, second.entry.storage_location);
        assert!(vault.retrieve(first.verification_id()).is_ok());
        assert!(vault.retrieve(second.verification_id()).is_ok());
    }

    // =========================================================================
    // INTEROP
    // =========================================================================

    #[test]
    fn test_python_sidecar_verifies() {
        let public = Ed25519KeyPair::from_seed([7u8; 32]).public_key();
        assert_eq!(public.to_base64(), PYTHON_PUBLIC_KEY);

        let report = verify_document_json(HELLO_DOC, PYTHON_SIDECAR.as_bytes(), &public);
        assert!(report.valid);
        assert_eq!(report.message, "Signature VALID");
        assert_eq!(report.signer.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_signing_reproduces_python_signature() {
        let expected = SignatureRecord::from_json_slice(PYTHON_SIDECAR.as_bytes()).unwrap();
        let record = sign_document(
            HELLO_DOC,
            &Ed25519KeyPair::from_seed([7u8; 32]),
            &SignerIdentity::new("Alice"),
            FIXED_RECORD_TIMESTAMP,
        )
        .unwrap();

        assert_eq!(record, expected);
        assert_eq!(
            String::from_utf8(record.payload().canonical_bytes().unwrap()).unwrap(),
            "{\"document_hash\": \"HsGgJn4z0q+N4w/agU35FViegrjhHdDl0KLFH468w1g=\", \
             \"signer\": \"Alice\", \
             \"timestamp\": \"2026-01-05T10:00:00.000000+07:00\"}"
        );
    }

    #[test]
    fn test_vault_accepts_python_sidecar_upload() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let report = vault.verify_upload(HELLO_DOC, PYTHON_SIDECAR.as_bytes());
        assert!(report.valid);
    }

    // =========================================================================
    // TRUST PATH
    // =========================================================================

    #[test]
    fn test_ca_attests_vault_signing_key() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let ca = CertificateAuthority::generate(CertificateIssuer {
            name: "Digital Signature CA".into(),
            country: "ID".into(),
        });

        let now = chrono::Utc::now();
        let certificate = ca
            .issue(
                CertificateSubject {
                    name: "Alice".into(),
                    email: "alice@example.org".into(),
                    organization: "Example University".into(),
                },
                Validity::new(now, now + chrono::Duration::days(365)).unwrap(),
                &vault.signer().public_key(),
            )
            .unwrap();

        assert!(ca.verify_certificate(&certificate));
        assert!(certificate.validity.contains(now));
        assert!(attests(&certificate, &ca.ca_public_key(), &vault.signer().public_key()));

        let stranger: Ed25519PublicKey = Ed25519KeyPair::generate().public_key();
        assert!(!attests(&certificate, &ca.ca_public_key(), &stranger));
    }
}
