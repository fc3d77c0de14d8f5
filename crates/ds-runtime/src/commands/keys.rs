//! `docseal keygen`

use anyhow::{bail, Result};
use serde_json::json;
use shared_crypto::{Ed25519KeyPair, FileKeyStore};

use super::CommandOutput;
use crate::container::RuntimeConfig;

/// Generate the document signing key pair.
///
/// Refuses to overwrite existing keys unless `force` is set; replacing the
/// key makes every earlier signature unverifiable.
pub fn keygen(config: &RuntimeConfig, force: bool) -> Result<CommandOutput> {
    let store = FileKeyStore::new(&config.keys.key_dir);
    if store.exists() && !force {
        bail!(
            "signing keys already exist in {} (use --force to replace them)",
            config.keys.key_dir.display()
        );
    }

    let keypair = Ed25519KeyPair::generate();
    store.write_keypair(&keypair)?;

    Ok(CommandOutput::ok(json!({
        "status": "GENERATED",
        "public_key": keypair.public_key().to_base64(),
        "private_key_path": store.private_path().display().to_string(),
        "public_key_path": store.public_path().display().to_string(),
    })))
}
