//! `docseal ca init | issue | verify`
//!
//! CA directory layout:
//!
//! ```text
//! <ca_dir>/ca_private.key
//! <ca_dir>/ca_public.key
//! <ca_dir>/issuer.json
//! <ca_dir>/serial.json      next sequence number, never reused
//! <ca_dir>/serial.lock
//! <ca_dir>/<subject>.cert.json
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use ds_02_certificate_authority::{
    attests, load_certificate, save_certificate, verify_certificate, CertificateAuthority,
    CertificateAuthorityApi, CertificateIssuer, CertificateSubject, SerialNumberAllocator,
    Validity, CERTIFICATE_SUFFIX,
};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_crypto::{Ed25519PublicKey, FileKeyStore, KeyStore};
use tracing::{info, warn};

use super::CommandOutput;
use crate::container::RuntimeConfig;

const ISSUER_FILE: &str = "issuer.json";
const SERIAL_FILE: &str = "serial.json";
const SERIAL_LOCK_FILE: &str = "serial.lock";
const SERIAL_PREFIX: &str = "DS";

#[derive(Debug, Serialize, Deserialize)]
struct SerialState {
    next: u32,
}

/// Parameters for `ca issue`.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub subject: CertificateSubject,
    pub valid_days: i64,
    /// Raw 32-byte public key file. Defaults to the configured signer key.
    pub public_key_file: Option<PathBuf>,
    /// Defaults to `<ca_dir>/<subject>.cert.json`.
    pub out: Option<PathBuf>,
    /// Replace an existing certificate file.
    pub force: bool,
}

/// Key ceremony: create the CA key pair and record the issuer.
pub fn init(config: &RuntimeConfig, issuer: CertificateIssuer, force: bool) -> Result<CommandOutput> {
    let dir = &config.keys.ca_dir;
    let store = CertificateAuthority::key_store(dir);
    if store.exists() && !force {
        bail!(
            "CA keys already exist in {} (use --force to replace them)",
            dir.display()
        );
    }

    let authority = CertificateAuthority::generate(issuer);
    authority.save_keys(&store)?;
    let issuer_path = dir.join(ISSUER_FILE);
    fs::write(&issuer_path, serde_json::to_vec_pretty(authority.issuer())?)
        .with_context(|| format!("writing {}", issuer_path.display()))?;

    Ok(CommandOutput::ok(json!({
        "status": "CA_CREATED",
        "issuer": authority.issuer(),
        "ca_public_key": authority.ca_public_key().to_base64(),
    })))
}

/// Issue a certificate binding a public key to `request.subject`.
///
/// Serial allocation runs under `serial.lock` so concurrent invocations never
/// hand out the same number.
pub fn issue(config: &RuntimeConfig, request: IssueRequest) -> Result<CommandOutput> {
    if request.valid_days <= 0 {
        bail!("validity must be at least one day");
    }
    let dir = &config.keys.ca_dir;
    let issuer = load_issuer(dir)?;

    let path = request.out.clone().unwrap_or_else(|| {
        dir.join(format!(
            "{}{}",
            certificate_stem(&request.subject.name),
            CERTIFICATE_SUFFIX
        ))
    });
    if path.exists() && !request.force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }

    let subject_key = match &request.public_key_file {
        Some(key_path) => read_public_key(key_path)?,
        None => FileKeyStore::new(&config.keys.key_dir)
            .public_key()
            .context("loading signer public key (pass --public-key to certify another key)")?,
    };

    let now = Utc::now();
    let not_after = Duration::try_days(request.valid_days)
        .and_then(|span| now.checked_add_signed(span))
        .context("validity period is too long")?;
    let validity = Validity::new(now, not_after)?;

    let _lock = lock_serials(dir)?;
    let sequence = next_serial(dir)?;
    let authority = CertificateAuthority::from_key_store(
        &CertificateAuthority::key_store(dir),
        issuer,
        SerialNumberAllocator::new(SERIAL_PREFIX, sequence),
    )?;
    let certificate = authority.issue(request.subject, validity, &subject_key)?;

    // Burn the number before the certificate exists anywhere.
    let following = sequence.checked_add(1).context("serial number space exhausted")?;
    store_next_serial(dir, following)?;
    save_certificate(&path, &certificate)?;
    info!(
        "[ds-runtime] Issued {} to {}",
        certificate.serial_number, certificate.subject.name
    );

    Ok(CommandOutput::ok(json!({
        "status": "ISSUED",
        "serial_number": certificate.serial_number,
        "subject": certificate.subject,
        "validity": certificate.validity,
        "path": path.display().to_string(),
    })))
}

/// Check a certificate against the CA public key and, when `signer_key_file`
/// is given, that it names exactly that key.
pub fn verify(
    config: &RuntimeConfig,
    certificate_path: &Path,
    signer_key_file: Option<&Path>,
) -> Result<CommandOutput> {
    let ca_public = CertificateAuthority::key_store(&config.keys.ca_dir)
        .public_key()
        .context("loading CA public key")?;
    let certificate = load_certificate(certificate_path)?;

    let signature_valid = verify_certificate(&certificate, &ca_public);
    let within_validity = certificate.validity.contains(Utc::now());

    let attests_signer = match signer_key_file {
        Some(path) => Some(attests(&certificate, &ca_public, &read_public_key(path)?)),
        None => None,
    };

    let valid = signature_valid && within_validity && attests_signer.unwrap_or(true);
    let body = json!({
        "valid": valid,
        "signature_valid": signature_valid,
        "within_validity": within_validity,
        "attests_signer": attests_signer,
        "serial_number": certificate.serial_number,
        "subject": certificate.subject,
        "issuer": certificate.issuer,
        "validity": certificate.validity,
    });
    Ok(if valid {
        CommandOutput::ok(body)
    } else {
        CommandOutput::refused(body)
    })
}

fn load_issuer(dir: &Path) -> Result<CertificateIssuer> {
    let issuer_path = dir.join(ISSUER_FILE);
    let bytes = fs::read(&issuer_path).with_context(|| {
        format!("reading {} (run `docseal ca init` first)", issuer_path.display())
    })?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", issuer_path.display()))
}

/// Exclusive lock held while a serial is allocated and recorded.
fn lock_serials(dir: &Path) -> Result<File> {
    let path = dir.join(SERIAL_LOCK_FILE);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    FileExt::lock_exclusive(&file).with_context(|| format!("locking {}", path.display()))?;
    Ok(file)
}

/// Sequence number for the next certificate.
///
/// Without `serial.json` the count resumes after the highest serial among the
/// certificates in `dir`.
fn next_serial(dir: &Path) -> Result<u32> {
    let path = dir.join(SERIAL_FILE);
    match fs::read(&path) {
        Ok(bytes) => {
            let state: SerialState = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(state.next.max(1))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => highest_issued(dir)
            .checked_add(1)
            .context("serial number space exhausted"),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn highest_issued(dir: &Path) -> u32 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.to_string_lossy().ends_with(CERTIFICATE_SUFFIX))
        .filter_map(|path| match load_certificate(&path) {
            Ok(certificate) => serial_sequence(&certificate.serial_number),
            Err(e) => {
                warn!("[ds-runtime] Skipping {}: {}", path.display(), e);
                None
            }
        })
        .max()
        .unwrap_or(0)
}

/// `"DS-2026-0007"` -> `7`.
fn serial_sequence(serial: &str) -> Option<u32> {
    serial.rsplit('-').next()?.parse().ok()
}

/// Record the next sequence number via temp file + rename.
fn store_next_serial(dir: &Path, next: u32) -> Result<()> {
    let path = dir.join(SERIAL_FILE);
    let tmp = dir.join(format!("{SERIAL_FILE}.tmp"));
    let bytes = serde_json::to_vec_pretty(&SerialState { next })?;

    let mut file = File::create(&tmp).with_context(|| format!("writing {}", tmp.display()))?;
    file.write_all(&bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

fn read_public_key(path: &Path) -> Result<Ed25519PublicKey> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ed25519PublicKey::from_slice(&bytes)
        .with_context(|| format!("{} is not a raw Ed25519 public key", path.display()))
}

/// `"Alice Example"` -> `"alice_example"`.
fn certificate_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "certificate".to_string()
    } else {
        stem
    }
}
