//! # Concurrency
//!
//! The registry is the only shared mutable resource. Concurrent registrations
//! must all persist, whether they share one handle or each open their own.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use tempfile::TempDir;

    use ds_03_verification_registry::{
        JsonFileRegistryStore, RegistryEntry, VerificationId, VerificationRegistry,
        VerificationRegistryApi,
    };
    use ds_04_retrieval_gate::RetrievalGateApi;

    use crate::fixtures::{file_vault, FIXED_RECORD_TIMESTAMP};

    const WRITERS: usize = 32;

    fn entry(id: VerificationId, n: usize) -> RegistryEntry {
        RegistryEntry::new(
            id,
            format!("doc-{n}.txt"),
            "Alice",
            FIXED_RECORD_TIMESTAMP,
            "Ed25519",
            format!("20260105_100000_{n:06x}"),
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_shared_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");
        let registry = Arc::new(VerificationRegistry::new(
            JsonFileRegistryStore::open(&path).unwrap(),
        ));

        let tasks: Vec<_> = (0..WRITERS)
            .map(|n| {
                let registry = Arc::clone(&registry);
                tokio::task::spawn_blocking(move || {
                    registry.register_with_fresh_id(&|id: VerificationId| entry(id, n)).unwrap()
                })
            })
            .collect();

        let mut registered = Vec::new();
        for task in tasks {
            registered.push(task.await.unwrap());
        }

        let reopened = VerificationRegistry::new(JsonFileRegistryStore::open(&path).unwrap());
        assert_eq!(reopened.len().unwrap(), WRITERS);
        for e in registered {
            assert_eq!(reopened.lookup(e.verification_id.as_str()).unwrap(), e);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_separate_handles() {
        // Each writer opens its own store, as separate processes would.
        let dir = TempDir::new().unwrap();
        let path = Arc::new(dir.path().join("registry.json"));

        let tasks: Vec<_> = (0..WRITERS)
            .map(|n| {
                let path = Arc::clone(&path);
                tokio::task::spawn_blocking(move || {
                    let registry =
                        VerificationRegistry::new(JsonFileRegistryStore::open(path.as_path()).unwrap());
                    registry.register_with_fresh_id(&|id: VerificationId| entry(id, n)).unwrap()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap().verification_id);
        }
        assert_eq!(ids.len(), WRITERS);

        let reopened = VerificationRegistry::new(JsonFileRegistryStore::open(path.as_path()).unwrap());
        assert_eq!(reopened.len().unwrap(), WRITERS);
        for id in ids {
            assert!(reopened.lookup(id.as_str()).is_ok());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_only_one_wins() {
        let dir = TempDir::new().unwrap();
        let registry = Arc::new(VerificationRegistry::new(
            JsonFileRegistryStore::open(dir.path().join("registry.json")).unwrap(),
        ));
        let id = VerificationId::generate();

        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let registry = Arc::clone(&registry);
                let id = id.clone();
                tokio::task::spawn_blocking(move || registry.register(entry(id, n)).is_ok())
            })
            .collect();

        let mut wins = 0;
        for task in tasks {
            if task.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sign_and_retrieve() {
        let dir = TempDir::new().unwrap();
        let vault = Arc::new(file_vault(dir.path(), 7));

        let tasks: Vec<_> = (0..16)
            .map(|n| {
                let vault = Arc::clone(&vault);
                tokio::task::spawn_blocking(move || {
                    let body = format!("document number {n}");
                    let signed = vault
                        .sign_and_register(&format!("doc-{n}.txt"), body.as_bytes())
                        .unwrap();
                    let released = vault.retrieve(signed.verification_id()).unwrap();
                    assert_eq!(released.bytes, body.as_bytes());
                    signed.entry.verification_id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }
        assert_eq!(ids.len(), 16);
        assert_eq!(vault.registry().len().unwrap(), 16);
    }
}
