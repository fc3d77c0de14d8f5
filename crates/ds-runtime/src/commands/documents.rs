//! `docseal sign | verify | lookup | retrieve`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ds_04_retrieval_gate::{RetrievalError, RetrievalGateApi};
use serde_json::json;

use super::CommandOutput;

/// Sign a file, store it and register it under a fresh verification id.
pub fn sign<G: RetrievalGateApi>(gate: &G, file: &Path) -> Result<CommandOutput> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?;
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    match gate.sign_and_register(filename, &bytes) {
        Ok(signed) => Ok(CommandOutput::ok(json!({
            "status": "SIGNED",
            "verification_id": signed.verification_id(),
            "signed_filename": signed.entry.signed_filename,
            "signature": signed.record,
        }))),
        Err(e @ RetrievalError::InvalidFilename(_)) => Ok(refusal(&e)),
        Err(e) => Err(e.into()),
    }
}

/// Check a document against a sidecar supplied by the caller.
pub fn verify<G: RetrievalGateApi>(gate: &G, file: &Path, sidecar: &Path) -> Result<CommandOutput> {
    let document = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let record = fs::read(sidecar).with_context(|| format!("reading {}", sidecar.display()))?;

    let report = gate.verify_upload(&document, &record);
    let body = serde_json::to_value(&report)?;
    Ok(if report.valid {
        CommandOutput::ok(body)
    } else {
        CommandOutput::refused(body)
    })
}

/// Public verification metadata for an id.
pub fn lookup<G: RetrievalGateApi>(gate: &G, verification_id: &str) -> Result<CommandOutput> {
    match gate.inspect(verification_id) {
        Ok(entry) => Ok(CommandOutput::ok(json!({
            "status": "FOUND",
            "entry": entry,
        }))),
        Err(e @ RetrievalError::NotFound(_)) => Ok(refusal(&e)),
        Err(e) => Err(e.into()),
    }
}

/// Re-verify and release a stored document to `out` (default: its signed
/// filename in the current directory).
pub fn retrieve<G: RetrievalGateApi>(
    gate: &G,
    verification_id: &str,
    out: Option<&Path>,
) -> Result<CommandOutput> {
    let released = match gate.retrieve(verification_id) {
        Ok(released) => released,
        Err(
            e @ (RetrievalError::NotFound(_)
            | RetrievalError::DocumentTampered { .. }
            | RetrievalError::SignatureInvalid { .. }
            | RetrievalError::MissingArtifact(_)),
        ) => return Ok(refusal(&e)),
        Err(e) => return Err(e.into()),
    };

    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(released.download_name()));
    fs::write(&path, &released.bytes).with_context(|| format!("writing {}", path.display()))?;

    Ok(CommandOutput::ok(json!({
        "status": "RELEASED",
        "verification_id": released.entry.verification_id,
        "path": path.display().to_string(),
        "bytes": released.bytes.len(),
        "signer": released.record.signer.name,
        "timestamp": released.record.timestamp,
    })))
}

fn refusal(err: &RetrievalError) -> CommandOutput {
    CommandOutput::refused(json!({
        "status": err.code(),
        "message": err.to_string(),
    }))
}
