//! # Certificate Attacks
//!
//! ## Attack Vectors
//!
//! 1. **Field edits**: change any attested field after issuance
//! 2. **Key swap**: put an attacker key into a genuine certificate
//! 3. **Rogue CA**: a self-made CA issuing for the victim's name
//! 4. **Signature transplant**: move a CA signature onto another certificate
//! 5. **Expired window**: a genuine certificate outside its validity
//! 6. **Field injection**: add claims the CA never signed to a genuine file
//!
//! ## Expected Defense
//!
//! `verify_certificate` and `attests` fail closed; validity is checked
//! explicitly by the caller through `Validity::contains`. Certificate files
//! carrying fields outside the signed set do not load.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use ds_02_certificate_authority::{
        attests, issue_certificate, load_certificate, save_certificate, verify_certificate,
        Certificate, CertificateIssuer, CertificateSubject, Validity,
    };
    use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey};

    fn issuer() -> CertificateIssuer {
        CertificateIssuer {
            name: "Digital Signature CA".into(),
            country: "ID".into(),
        }
    }

    fn subject(name: &str) -> CertificateSubject {
        CertificateSubject {
            name: name.into(),
            email: format!("{}@example.org", name.to_lowercase()),
            organization: "Example University".into(),
        }
    }

    fn validity() -> Validity {
        Validity::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2028, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn issue(ca: &Ed25519KeyPair, serial: &str, name: &str, key: &Ed25519PublicKey) -> Certificate {
        issue_certificate(
            serial.to_string(),
            subject(name),
            issuer(),
            validity(),
            key,
            ca,
        )
        .unwrap()
    }

    #[test]
    fn test_field_edits_detected() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let signer = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let genuine = issue(&ca, "DS-2026-0001", "Alice", &signer);
        assert!(verify_certificate(&genuine, &ca.public_key()));

        let edits: Vec<Box<dyn Fn(&mut Certificate)>> = vec![
            Box::new(|c: &mut Certificate| c.subject.name = "Mallory".into()),
            Box::new(|c: &mut Certificate| c.subject.organization = "Mallory Inc".into()),
            Box::new(|c: &mut Certificate| c.issuer.country = "US".into()),
            Box::new(|c: &mut Certificate| c.validity.not_after = "2099-01-01T00:00:00Z".into()),
            Box::new(|c: &mut Certificate| c.serial_number = "DS-2026-0002".into()),
            Box::new(|c: &mut Certificate| c.version = "Mini X.509 v2".into()),
        ];
        for edit in edits {
            let mut forged = genuine.clone();
            edit(&mut forged);
            assert!(!verify_certificate(&forged, &ca.public_key()));
        }
    }

    #[test]
    fn test_key_swap() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let alice = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let mallory = Ed25519KeyPair::from_seed([3u8; 32]).public_key();

        let mut forged = issue(&ca, "DS-2026-0001", "Alice", &alice);
        forged.public_key = mallory.to_base64();

        assert!(!verify_certificate(&forged, &ca.public_key()));
        assert!(!attests(&forged, &ca.public_key(), &mallory));
    }

    #[test]
    fn test_rogue_ca() {
        let real_ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let rogue_ca = Ed25519KeyPair::from_seed([9u8; 32]);
        let mallory = Ed25519KeyPair::from_seed([3u8; 32]).public_key();

        let rogue = issue(&rogue_ca, "DS-2026-0001", "Alice", &mallory);
        assert!(verify_certificate(&rogue, &rogue_ca.public_key()));
        assert!(!verify_certificate(&rogue, &real_ca.public_key()));
        assert!(!attests(&rogue, &real_ca.public_key(), &mallory));
    }

    #[test]
    fn test_signature_transplant() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let alice = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let mallory = Ed25519KeyPair::from_seed([3u8; 32]).public_key();

        let genuine = issue(&ca, "DS-2026-0001", "Alice", &alice);
        let mut forged = genuine.clone();
        forged.public_key = mallory.to_base64();
        forged.ca_signature = genuine.ca_signature.clone();

        assert!(!verify_certificate(&forged, &ca.public_key()));
    }

    #[test]
    fn test_malformed_signature_fails_closed() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let alice = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let mut cert = issue(&ca, "DS-2026-0001", "Alice", &alice);

        cert.ca_signature.truncate(10);
        assert!(!verify_certificate(&cert, &ca.public_key()));
        cert.ca_signature.clear();
        assert!(!verify_certificate(&cert, &ca.public_key()));
    }

    #[test]
    fn test_expired_window_is_visible() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let alice = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let cert = issue(&ca, "DS-2026-0001", "Alice", &alice);

        // Cryptographically valid, but the caller can see it is out of window.
        assert!(verify_certificate(&cert, &ca.public_key()));
        let after = Utc.with_ymd_and_hms(2028, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(1);
        assert!(!cert.validity.contains(after));
        let before = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert!(!cert.validity.contains(before));
    }

    #[test]
    fn test_injected_fields_rejected() {
        let ca = Ed25519KeyPair::from_seed([1u8; 32]);
        let alice = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        let genuine = issue(&ca, "DS-2026-0001", "Alice", &alice);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("alice.cert.json");
        save_certificate(&path, &genuine).unwrap();
        assert!(verify_certificate(&load_certificate(&path).unwrap(), &ca.public_key()));

        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        value["role"] = "administrator".into();
        value["subject"]["title"] = "Rector".into();
        std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();

        assert!(load_certificate(&path).is_err());
        assert!(serde_json::from_value::<Certificate>(value).is_err());
    }
}
