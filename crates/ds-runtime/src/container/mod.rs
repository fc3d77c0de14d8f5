//! # Service Container
//!
//! Builds the document vault once per process: configuration is validated,
//! the signing key is loaded and held read-only, and the registry and
//! document store are opened.

pub mod config;

pub use config::{
    ConfigError, KeyConfig, LoggingConfig, RuntimeConfig, SignerConfig, StorageConfig,
    MAX_UTC_OFFSET_MINUTES,
};

use anyhow::{Context, Result};
use ds_01_document_signing::{DocumentSigningService, SignerIdentity, SystemClock};
use ds_03_verification_registry::{JsonFileRegistryStore, VerificationRegistry};
use ds_04_retrieval_gate::{DocumentVault, FileSystemDocumentStore};
use shared_crypto::FileKeyStore;
use tracing::info;

/// Signing service with the wall clock.
pub type ConcreteSigner = DocumentSigningService<SystemClock>;

/// Vault over the JSON registry and the filesystem document store.
pub type ConcreteVault =
    DocumentVault<ConcreteSigner, VerificationRegistry<JsonFileRegistryStore>, FileSystemDocumentStore>;

pub struct ServiceContainer {
    config: RuntimeConfig,
    vault: ConcreteVault,
}

impl ServiceContainer {
    pub fn open(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;

        let clock = SystemClock::with_offset_minutes(config.signer.utc_offset_minutes)
            .ok_or(ConfigError::OffsetOutOfRange(config.signer.utc_offset_minutes))?;
        let identity =
            SignerIdentity::new(config.signer.name.as_str()).with_system(config.signer.system.as_str());

        let keys = FileKeyStore::new(&config.keys.key_dir);
        let signer = DocumentSigningService::from_key_store(&keys, identity, clock)
            .with_context(|| {
                format!(
                    "loading signing key from {} (run `docseal keygen` first)",
                    config.keys.key_dir.display()
                )
            })?;

        let registry_path = config.storage.registry_path();
        let registry = JsonFileRegistryStore::open(&registry_path)
            .with_context(|| format!("opening registry {}", registry_path.display()))?;

        let uploads = config.storage.uploads_dir();
        let store = FileSystemDocumentStore::new(&uploads)
            .with_context(|| format!("opening document store {}", uploads.display()))?;

        info!(
            "[ds-runtime] Ready: signer '{}', registry {}, uploads {}",
            config.signer.name,
            registry_path.display(),
            uploads.display()
        );

        Ok(Self {
            vault: DocumentVault::new(signer, VerificationRegistry::new(registry), store),
            config,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn vault(&self) -> &ConcreteVault {
        &self.vault
    }
}
