//! Certificate files: pretty JSON named `<name>.cert.json`.

use crate::domain::entities::Certificate;
use crate::domain::errors::CertificateError;
use std::fs;
use std::path::Path;

/// Conventional suffix of certificate files.
pub const CERTIFICATE_SUFFIX: &str = ".cert.json";

/// Write a certificate, creating the parent directory.
pub fn save_certificate(path: &Path, certificate: &Certificate) -> Result<(), CertificateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CertificateError::Io(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(certificate)
        .map_err(|e| CertificateError::Serialization(e.to_string()))?;
    fs::write(path, json).map_err(|e| CertificateError::Io(format!("{}: {}", path.display(), e)))
}

/// Read a certificate file.
pub fn load_certificate(path: &Path) -> Result<Certificate, CertificateError> {
    let bytes =
        fs::read(path).map_err(|e| CertificateError::Io(format!("{}: {}", path.display(), e)))?;
    serde_json::from_slice(&bytes).map_err(|e| CertificateError::Serialization(e.to_string()))
}
