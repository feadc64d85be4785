//! # Symmetric Envelope Cipher
//!
//! Provides AES-256-GCM encryption for message confidentiality and integrity.
//!
//! ## Encryption Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ENVELOPE ENCRYPTION FLOW                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Step 1: Obtain an Envelope Key                                        │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  EnvelopeKey::generate()  → 256-bit AES-GCM key              │       │
//! │  │  (per message, or per conversation at the caller's choice)  │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Step 2: Generate Nonce (unique per encryption)                        │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  Random 12 bytes from the OS CSPRNG, drawn INSIDE encrypt() │       │
//! │  │  Never caller-supplied, never derived from content,         │       │
//! │  │  nonce reuse is structurally impossible.                    │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Step 3: Encrypt                                                       │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  AES-256-GCM(key, nonce, plaintext)                          │       │
//! │  │           ↓                                                  │       │
//! │  │  Ciphertext + 16-byte Auth Tag                               │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Output: EncryptedMessage { ciphertext: base64, nonce: base64 }        │
//! │  Both fields must travel together; the nonce is not secret.            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only holders of the envelope key can read the body |
//! | Integrity | Any modification of ciphertext or nonce is detected |
//! | Fail-closed | Tag mismatch rejects; plaintext is never partially returned |
//!
//! Random 96-bit nonces are safe for up to 2^32 messages per key (birthday
//! bound). Never reuse a nonce with the same key; that is why this module
//! refuses to accept one from the caller on the encrypt path.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding;
use crate::error::{Error, Result};

/// Size of the envelope key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// A 256-bit AES-GCM envelope key
///
/// Generated per message (or per conversation session, at the caller's
/// discretion), exported only for wrapping, and zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EnvelopeKey([u8; KEY_SIZE]);

impl EnvelopeKey {
    /// Generate a fresh random envelope key
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| Error::RngFailed)?;
        Ok(Self(bytes))
    }

    /// Create from raw key bytes (must be exactly 32 bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKey(format!("Envelope key must be {} bytes", KEY_SIZE)))?;
        Ok(Self(bytes))
    }

    /// Export the raw key bytes as base64 text
    ///
    /// ## Security Warning
    ///
    /// The result is the bare key. Persist it only in wrapped form
    /// (see [`crate::wrap`]) or behind a secure store.
    pub fn export(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Import a key previously produced by [`export`](Self::export)
    pub fn import(text: &str) -> Result<Self> {
        let bytes = encoding::decode(text)?;
        Self::from_bytes(&bytes)
    }

    /// Raw key bytes, for wrapping under a recipient's public key
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for EnvelopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("EnvelopeKey").finish_non_exhaustive()
    }
}

/// The output of one envelope encryption: ciphertext and its nonce
///
/// Both fields are base64 text and must travel together. The nonce is not
/// secret, but it must never be reused with the same key. This crate
/// guarantees that by generating it inside [`encrypt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    /// Base64-encoded ciphertext with the 128-bit auth tag appended
    pub ciphertext: String,
    /// Base64-encoded 96-bit nonce used for this encryption
    pub nonce: String,
}

/// Encrypt a text payload under an envelope key
///
/// A fresh random nonce is drawn from the OS CSPRNG on every call; the
/// caller cannot supply one. Consumes entropy from the system random source.
pub fn encrypt(plaintext: &str, key: &EnvelopeKey) -> Result<EncryptedMessage> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|_| Error::RngFailed)?;

    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| Error::EncryptionFailed(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedMessage {
        ciphertext: encoding::encode(&ciphertext),
        nonce: encoding::encode(&nonce),
    })
}

/// Decrypt a text payload encrypted by [`encrypt`]
///
/// The authentication tag is verified before any plaintext is returned.
/// Fails with [`Error::AuthenticationFailed`] on tag mismatch; corruption,
/// tampering, and key mismatch are indistinguishable by design.
pub fn decrypt(ciphertext: &str, nonce: &str, key: &EnvelopeKey) -> Result<String> {
    let ciphertext = encoding::decode(ciphertext)?;
    let nonce = encoding::decode(nonce)?;

    if nonce.len() != NONCE_SIZE {
        return Err(Error::DecodingFailed(format!(
            "Nonce must be {} bytes, got {}",
            NONCE_SIZE,
            nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    let plaintext = cipher
        .decrypt(AesNonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| Error::AuthenticationFailed)?;

    String::from_utf8(plaintext)
        .map_err(|_| Error::DecodingFailed("Decrypted payload is not valid UTF-8".into()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = EnvelopeKey::generate().unwrap();

        let message = encrypt("hello", &key).unwrap();
        let decrypted = decrypt(&message.ciphertext, &message.nonce, &key).unwrap();

        assert_eq!(decrypted, "hello");
    }

    #[test]
    fn test_encrypt_decrypt_empty() {
        let key = EnvelopeKey::generate().unwrap();

        let message = encrypt("", &key).unwrap();
        assert_eq!(decrypt(&message.ciphertext, &message.nonce, &key).unwrap(), "");
    }

    #[test]
    fn test_encrypt_decrypt_unicode() {
        let key = EnvelopeKey::generate().unwrap();
        let plaintext = "emoji 🦀 and accents: café, 日本語";

        let message = encrypt(plaintext, &key).unwrap();
        assert_eq!(
            decrypt(&message.ciphertext, &message.nonce, &key).unwrap(),
            plaintext
        );
    }

    #[test]
    fn test_ciphertext_carries_tag() {
        let key = EnvelopeKey::generate().unwrap();
        let plaintext = "hello";

        let message = encrypt(plaintext, &key).unwrap();
        let raw = crate::encoding::decode(&message.ciphertext).unwrap();

        assert_eq!(raw.len(), plaintext.len() + TAG_SIZE);
    }

    #[test]
    fn test_tampered_ciphertext_fails_closed() {
        let key = EnvelopeKey::generate().unwrap();
        let message = encrypt("do not touch", &key).unwrap();

        let mut raw = crate::encoding::decode(&message.ciphertext).unwrap();
        for i in 0..raw.len() {
            raw[i] ^= 0x01;
            let tampered = crate::encoding::encode(&raw);
            assert!(matches!(
                decrypt(&tampered, &message.nonce, &key),
                Err(Error::AuthenticationFailed)
            ));
            raw[i] ^= 0x01;
        }
    }

    #[test]
    fn test_tampered_nonce_fails_closed() {
        let key = EnvelopeKey::generate().unwrap();
        let message = encrypt("do not touch", &key).unwrap();

        let mut nonce = crate::encoding::decode(&message.nonce).unwrap();
        nonce[0] ^= 0x01;
        let tampered = crate::encoding::encode(&nonce);

        assert!(matches!(
            decrypt(&message.ciphertext, &tampered, &key),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = EnvelopeKey::generate().unwrap();
        let other = EnvelopeKey::generate().unwrap();

        let message = encrypt("secret", &key).unwrap();
        assert!(matches!(
            decrypt(&message.ciphertext, &message.nonce, &other),
            Err(Error::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_wrong_length_nonce_rejected() {
        let key = EnvelopeKey::generate().unwrap();
        let message = encrypt("secret", &key).unwrap();

        let short = crate::encoding::encode(&[0u8; 8]);
        assert!(matches!(
            decrypt(&message.ciphertext, &short, &key),
            Err(Error::DecodingFailed(_))
        ));
    }

    #[test]
    fn test_nonce_unique_across_calls() {
        let key = EnvelopeKey::generate().unwrap();

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let message = encrypt("same plaintext", &key).unwrap();
            assert!(seen.insert(message.nonce), "nonce repeated");
        }
    }

    #[test]
    fn test_same_plaintext_different_ciphertext() {
        let key = EnvelopeKey::generate().unwrap();

        let first = encrypt("hello", &key).unwrap();
        let second = encrypt("hello", &key).unwrap();

        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_key_export_import_round_trip() {
        let key = EnvelopeKey::generate().unwrap();
        let text = key.export();

        let imported = EnvelopeKey::import(&text).unwrap();
        let message = encrypt("interop", &key).unwrap();

        assert_eq!(
            decrypt(&message.ciphertext, &message.nonce, &imported).unwrap(),
            "interop"
        );
    }

    #[test]
    fn test_import_rejects_wrong_length() {
        let short = crate::encoding::encode(&[0u8; 16]);
        assert!(matches!(
            EnvelopeKey::import(&short),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_message_serializes_to_json() {
        let key = EnvelopeKey::generate().unwrap();
        let message = encrypt("persist me", &key).unwrap();

        let json = serde_json::to_string(&message).unwrap();
        let restored: EncryptedMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(message, restored);
        assert_eq!(
            decrypt(&restored.ciphertext, &restored.nonce, &key).unwrap(),
            "persist me"
        );
    }
}
