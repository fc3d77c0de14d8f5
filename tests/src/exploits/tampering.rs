//! # Storage Tampering
//!
//! An attacker with write access to the uploads directory after signing.
//!
//! ## Attack Vectors
//!
//! 1. **Content edit**: change the stored document, optionally relabelling the sidecar
//! 2. **Truncation / extension**: shorten or append to it
//! 3. **Sidecar swap**: pair a document with another document's valid sidecar
//! 4. **Consistent rewrite**: replace document and sidecar with attacker-signed versions
//! 5. **Artifact removal**: delete the document or the sidecar
//! 6. **Registry redirection**: point an entry at another folder or outside the root
//!
//! ## Expected Defense
//!
//! `retrieve` re-verifies current bytes on every call and refuses with the
//! specific reason; nothing outside the uploads root is ever read.

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;
    use tempfile::TempDir;

    use ds_01_document_signing::{sign_document, SignerIdentity};
    use ds_04_retrieval_gate::{RetrievalError, RetrievalGateApi};
    use shared_crypto::Ed25519KeyPair;

    use crate::fixtures::{file_vault, FileVault, FIXED_RECORD_TIMESTAMP, HELLO_DOC};

    fn signed(vault: &FileVault, name: &str, body: &[u8]) -> (String, String) {
        let signed = vault.sign_and_register(name, body).unwrap();
        (
            signed.verification_id().to_string(),
            signed.entry.storage_location,
        )
    }

    #[test]
    fn test_content_edit() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id, location) = signed(&vault, "hello.txt", HELLO_DOC);

        let path = vault.store().document_path(&location, "hello.txt").unwrap();
        fs::write(&path, b"HELLO-DOC\n").unwrap();
        assert!(matches!(
            vault.retrieve(&id),
            Err(RetrievalError::DocumentTampered { .. })
        ));
    }

    #[test]
    fn test_content_edit_with_relabelled_sidecar() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id, location) = signed(&vault, "hello.txt", HELLO_DOC);

        let sidecar = vault.store().sidecar_path(&location, "hello.txt").unwrap();
        let mut record: Value = serde_json::from_slice(&fs::read(&sidecar).unwrap()).unwrap();
        record["hash_algorithm"] = "sha-256".into();
        fs::write(&sidecar, serde_json::to_vec_pretty(&record).unwrap()).unwrap();
        fs::write(
            vault.store().document_path(&location, "hello.txt").unwrap(),
            b"hello-dog\n",
        )
        .unwrap();

        assert!(matches!(
            vault.retrieve(&id),
            Err(RetrievalError::DocumentTampered { .. })
        ));
    }

    #[test]
    fn test_truncation_and_extension() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id, location) = signed(&vault, "hello.txt", HELLO_DOC);
        let path = vault.store().document_path(&location, "hello.txt").unwrap();

        for body in [&HELLO_DOC[..9], b"hello-doc\n\n".as_slice(), b"".as_slice()] {
            fs::write(&path, body).unwrap();
            assert!(matches!(
                vault.retrieve(&id),
                Err(RetrievalError::DocumentTampered { .. })
            ));
        }
    }

    #[test]
    fn test_sidecar_swap() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id_a, loc_a) = signed(&vault, "a.txt", b"contract A");
        let (_, loc_b) = signed(&vault, "b.txt", b"contract B");

        let sidecar_b = fs::read(vault.store().sidecar_path(&loc_b, "b.txt").unwrap()).unwrap();
        fs::write(vault.store().sidecar_path(&loc_a, "a.txt").unwrap(), sidecar_b).unwrap();

        assert!(matches!(
            vault.retrieve(&id_a),
            Err(RetrievalError::DocumentTampered { .. })
        ));
    }

    #[test]
    fn test_consistent_rewrite_with_attacker_key() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id, location) = signed(&vault, "hello.txt", HELLO_DOC);

        let body = b"pay Mallory".as_slice();
        let forged = sign_document(
            body,
            &Ed25519KeyPair::from_seed([66u8; 32]),
            &SignerIdentity::new("Alice"),
            FIXED_RECORD_TIMESTAMP,
        )
        .unwrap();
        fs::write(vault.store().document_path(&location, "hello.txt").unwrap(), body).unwrap();
        fs::write(
            vault.store().sidecar_path(&location, "hello.txt").unwrap(),
            forged.to_json_pretty().unwrap(),
        )
        .unwrap();

        assert!(matches!(
            vault.retrieve(&id),
            Err(RetrievalError::SignatureInvalid { .. })
        ));
    }

    #[test]
    fn test_sidecar_corruption() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id, location) = signed(&vault, "hello.txt", HELLO_DOC);

        fs::write(
            vault.store().sidecar_path(&location, "hello.txt").unwrap(),
            b"{ definitely not a record",
        )
        .unwrap();
        assert!(matches!(
            vault.retrieve(&id),
            Err(RetrievalError::SignatureInvalid { .. })
        ));
    }

    #[test]
    fn test_artifact_removal() {
        let dir = TempDir::new().unwrap();
        let vault = file_vault(dir.path(), 7);
        let (id_a, loc_a) = signed(&vault, "a.txt", b"a");
        let (id_b, loc_b) = signed(&vault, "b.txt", b"b");

        fs::remove_file(vault.store().document_path(&loc_a, "a.txt").unwrap()).unwrap();
        fs::remove_file(vault.store().sidecar_path(&loc_b, "b.txt").unwrap()).unwrap();

        assert!(matches!(
            vault.retrieve(&id_a),
            Err(RetrievalError::MissingArtifact(_))
        ));
        assert!(matches!(
            vault.retrieve(&id_b),
            Err(RetrievalError::MissingArtifact(_))
        ));
    }

    fn rewrite_registry(dir: &TempDir, id: &str, field: &str, value: &str) {
        let path = dir.path().join("registry.json");
        let mut registry: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        registry[id][field] = Value::String(value.to_string());
        fs::write(&path, serde_json::to_vec_pretty(&registry).unwrap()).unwrap();
    }

    #[test]
    fn test_registry_redirected_to_other_document() {
        let dir = TempDir::new().unwrap();
        let (id_a, id_b, loc_b) = {
            let vault = file_vault(dir.path(), 7);
            let (id_a, _) = signed(&vault, "same.txt", b"original terms");
            let (id_b, loc_b) = signed(&vault, "same.txt", b"other terms");
            (id_a, id_b, loc_b)
        };

        // The redirected entry serves B's authentic bytes; the gate releases only
        // what verifies, and the released record names B's signature.
        rewrite_registry(&dir, &id_a, "storage_location", &loc_b);
        let vault = file_vault(dir.path(), 7);
        let released = vault.retrieve(&id_a).unwrap();
        assert_eq!(released.bytes, b"other terms");
        assert_eq!(
            released.record,
            vault.retrieve(&id_b).unwrap().record
        );
    }

    #[test]
    fn test_registry_path_traversal() {
        let dir = TempDir::new().unwrap();
        let id = {
            let vault = file_vault(dir.path(), 7);
            signed(&vault, "hello.txt", HELLO_DOC).0
        };
        fs::write(dir.path().join("secret.txt"), b"outside the uploads root").unwrap();

        rewrite_registry(&dir, &id, "storage_location", "..");
        rewrite_registry(&dir, &id, "filename", "secret.txt");
        let vault = file_vault(dir.path(), 7);

        let err = vault.retrieve(&id).unwrap_err();
        assert!(!matches!(err, RetrievalError::NotFound(_)));
        assert!(matches!(err, RetrievalError::InvalidFilename(_)));
    }
}
