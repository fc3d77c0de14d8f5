//! # Runtime Configuration
//!
//! Defaults, overridden by `DS_*` environment variables, overridden in turn by
//! command-line flags.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DS_DATA_DIR` | `storage.data_dir` |
//! | `DS_REGISTRY_PATH` | `storage.registry_path` |
//! | `DS_KEY_DIR` | `keys.key_dir` |
//! | `DS_CA_DIR` | `keys.ca_dir` |
//! | `DS_SIGNER_NAME` | `signer.name` |
//! | `DS_SIGNER_SYSTEM` | `signer.system` |
//! | `DS_UTC_OFFSET_MINUTES` | `signer.utc_offset_minutes` |
//! | `DS_LOG_LEVEL` | `logging.level` |

use std::path::PathBuf;

use ds_01_document_signing::DEFAULT_SIGNER_SYSTEM;
use thiserror::Error;

/// Largest UTC offset chrono accepts, in minutes.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub storage: StorageConfig,
    pub keys: KeyConfig,
    pub signer: SignerConfig,
    pub logging: LoggingConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Signer name must not be empty (set DS_SIGNER_NAME or --signer)")]
    EmptySignerName,

    #[error("UTC offset {0} minutes is outside ±1080 minutes")]
    OffsetOutOfRange(i32),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where documents and the registry live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Defaults to `<data_dir>/registry.json`.
    pub registry_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("registry.json"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            registry_path: None,
        }
    }
}

/// Key material directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    /// Holds `private.key` / `public.key` for the document signer.
    pub key_dir: PathBuf,
    /// Holds `ca_private.key` / `ca_public.key`, the issuer and issued certificates.
    pub ca_dir: PathBuf,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key_dir: PathBuf::from("./keys"),
            ca_dir: PathBuf::from("./ca"),
        }
    }
}

/// Identity and clock used when signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    pub name: String,
    pub system: String,
    /// Offset written into signing timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            name: "Document Signer".to_string(),
            system: DEFAULT_SIGNER_SYSTEM.to_string(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `ds_03_verification_registry=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("DS_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("DS_REGISTRY_PATH") {
            config.storage.registry_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = get("DS_KEY_DIR") {
            config.keys.key_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("DS_CA_DIR") {
            config.keys.ca_dir = PathBuf::from(dir);
        }
        if let Some(name) = get("DS_SIGNER_NAME") {
            config.signer.name = name;
        }
        if let Some(system) = get("DS_SIGNER_SYSTEM") {
            config.signer.system = system;
        }
        if let Some(raw) = get("DS_UTC_OFFSET_MINUTES") {
            config.signer.utc_offset_minutes =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DS_UTC_OFFSET_MINUTES",
                    value: raw.clone(),
                })?;
        }
        if let Some(level) = get("DS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Reject settings that would produce unusable signatures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signer.name.trim().is_empty() {
            return Err(ConfigError::EmptySignerName);
        }
        if self.signer.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::OffsetOutOfRange(self.signer.utc_offset_minutes));
        }
        Ok(())
    }
}
