//! # Key Wrapping
//!
//! Secure delivery of envelope keys via RSA-OAEP.
//!
//! ## Hybrid Construction
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     HYBRID ENVELOPE DELIVERY                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SENDER                                                                 │
//! │  ──────                                                                 │
//! │  1. envelope_key = EnvelopeKey::generate()                              │
//! │  2. body = envelope::encrypt(message, envelope_key)      (cheap, AES)  │
//! │  3. for each recipient:                                                │
//! │       wrapped[r] = wrap_key(envelope_key, r.public_key)  (small, RSA)  │
//! │                                                                         │
//! │  Transmit: { body.ciphertext, body.nonce, wrapped[*] }                 │
//! │                                                                         │
//! │  RECIPIENT                                                              │
//! │  ─────────                                                              │
//! │  1. envelope_key = unwrap_key(wrapped[me], my_private_key)             │
//! │  2. message = envelope::decrypt(body.ciphertext, body.nonce, key)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! RSA is expensive and bounded in payload size, so it is applied only to
//! the fixed 32-byte envelope key; the message body, however large,
//! is encrypted once with the symmetric cipher. Every recipient gets their
//! own wrapped copy of the *same* envelope key and can decrypt the same
//! ciphertext body independently.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::encoding;
use crate::envelope::EnvelopeKey;
use crate::error::Result;
use crate::identity::{IdentityPrivateKey, IdentityPublicKey};

/// An envelope key encrypted under one recipient's public key
///
/// Opaque to everyone except the holder of the matching private key.
/// Safe to persist and transmit as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrappedKey(String);

impl WrappedKey {
    /// The wrapped key as boundary-safe text
    pub fn as_text(&self) -> &str {
        &self.0
    }

    /// Reconstruct from previously persisted text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// Wrap an envelope key for one recipient
///
/// Call once per recipient of a message; every call produces an
/// independently decryptable copy of the same key.
pub fn wrap_key(key: &EnvelopeKey, recipient: &IdentityPublicKey) -> Result<WrappedKey> {
    let ciphertext = recipient.encrypt(key.as_bytes())?;
    Ok(WrappedKey(encoding::encode(&ciphertext)))
}

/// Unwrap an envelope key with the recipient's private key
///
/// Fails with [`Error::DecryptionFailed`](crate::Error::DecryptionFailed)
/// if the private key does not match the wrapping public key.
pub fn unwrap_key(wrapped: &WrappedKey, private: &IdentityPrivateKey) -> Result<EnvelopeKey> {
    let ciphertext = encoding::decode(&wrapped.0)?;
    let mut raw = private.decrypt(&ciphertext)?;
    // Scrub the intermediate buffer; only the EnvelopeKey keeps the material
    let key = EnvelopeKey::from_bytes(&raw);
    raw.zeroize();
    key
}

// ============================================================================
// TESTS
// ============================================================================
