//! # Encoding Layer
//!
//! Canonical binary-to-text conversion used at every crate boundary.
//!
//! All binary values (keys, ciphertexts, nonces, wrapped keys, digests)
//! cross component boundaries as standard base64 with padding, safe to
//! place in JSON fields, query parameters, or flat files. No component
//! hands another a raw buffer directly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Encode bytes as standard base64 (with padding)
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 text back into bytes
///
/// Malformed or mis-padded input fails with [`Error::DecodingFailed`];
/// partial or zero-filled output is never returned.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| Error::DecodingFailed(format!("Invalid base64: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
