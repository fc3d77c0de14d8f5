//! Base64 helpers for binary values carried in textual records.
//!
//! Standard alphabet with padding, matching the sidecar and certificate
//! files written by earlier releases.

use crate::CryptoError;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode bytes as standard padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
}
