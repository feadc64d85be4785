//! # Crypto Provider
//!
//! The front door of the crate: one explicitly-constructed capability
//! object exposing every operation.
//!
//! ## Why a Provider
//!
//! The primitives this crate composes ultimately depend on one ambient
//! capability, a cryptographically secure random source. Rather than
//! letting each operation discover a dead CSPRNG at call time, the
//! provider probes it once at construction and fails there with
//! [`Error::CapabilityUnavailable`]. Construction also validates the
//! [`CryptoConfig`] once; operations never re-validate parameters.
//!
//! ```text
//! CryptoProvider::new()                     ── probe CSPRNG, validate config
//!     │
//!     ├── generate_key_pair()               ── identity setup (expensive)
//!     ├── export/import_{public,private}_key()
//!     ├── encrypt_asymmetric() / decrypt_asymmetric()
//!     │
//!     ├── generate_envelope_key()
//!     ├── export/import_envelope_key()
//!     ├── encrypt() / decrypt()             ── message bodies
//!     │
//!     ├── wrap_key() / unwrap_key()         ── per-recipient key delivery
//!     │
//!     ├── derive_key() / generate_salt()    ── password-derived keys
//!     │
//!     └── generate_secure_token() / hash_data()
//! ```
//!
//! Every operation is a pure function of its inputs plus the system random
//! source. The provider holds no session state and is safe to share across
//! threads; concurrent operations on unrelated keys need no coordination.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::CryptoConfig;
use crate::encoding;
use crate::envelope::{self, EncryptedMessage, EnvelopeKey};
use crate::error::{Error, Result};
use crate::hashing;
use crate::identity::{IdentityKeyPair, IdentityPrivateKey, IdentityPublicKey};
use crate::kdf;
use crate::random;
use crate::wrap::{self, WrappedKey};

/// Capability object exposing all envelope and key-management operations
///
/// Cheap to clone and share; holds only the validated configuration.
#[derive(Debug, Clone)]
pub struct CryptoProvider {
    config: CryptoConfig,
}

impl CryptoProvider {
    /// Construct a provider with the default configuration
    ///
    /// Fails with [`Error::CapabilityUnavailable`] if the system random
    /// source is unusable.
    pub fn new() -> Result<Self> {
        Self::with_config(CryptoConfig::default())
    }

    /// Construct a provider with an explicit configuration
    ///
    /// The configuration is validated here, once; invalid parameters fail
    /// with [`Error::InvalidConfig`] before any key material exists.
    pub fn with_config(config: CryptoConfig) -> Result<Self> {
        config.validate()?;

        // Probe the CSPRNG so a missing capability surfaces at construction,
        // not at the first operation
        let mut probe = [0u8; 16];
        OsRng.try_fill_bytes(&mut probe).map_err(|e| {
            Error::CapabilityUnavailable(format!("System random source unusable: {}", e))
        })?;

        Ok(Self { config })
    }

    /// The validated configuration in effect
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    // ========================================================================
    // ASYMMETRIC IDENTITY KEYS
    // ========================================================================

    /// Generate a new identity key pair
    ///
    /// Identity-setup operation, computationally expensive. Do not call
    /// per message. See [`IdentityKeyPair::generate`].
    pub fn generate_key_pair(&self) -> Result<IdentityKeyPair> {
        IdentityKeyPair::generate(self.config.modulus_bits)
    }

    /// Export a public key as base64 SPKI text
    pub fn export_public_key(&self, key: &IdentityPublicKey) -> Result<String> {
        key.export()
    }

    /// Export a private key as base64 PKCS#8 text
    pub fn export_private_key(&self, key: &IdentityPrivateKey) -> Result<String> {
        key.export()
    }

    /// Import a public key previously exported by [`export_public_key`](Self::export_public_key)
    pub fn import_public_key(&self, text: &str) -> Result<IdentityPublicKey> {
        IdentityPublicKey::import(text)
    }

    /// Import a private key previously exported by [`export_private_key`](Self::export_private_key)
    pub fn import_private_key(&self, text: &str) -> Result<IdentityPrivateKey> {
        IdentityPrivateKey::import(text)
    }

    /// Encrypt a short text payload directly under a public key
    ///
    /// Bounded by the modulus size: this path wraps keys and digests,
    /// never message bodies. Returns base64 ciphertext.
    pub fn encrypt_asymmetric(&self, plaintext: &str, key: &IdentityPublicKey) -> Result<String> {
        let ciphertext = key.encrypt(plaintext.as_bytes())?;
        Ok(encoding::encode(&ciphertext))
    }

    /// Decrypt a payload produced by [`encrypt_asymmetric`](Self::encrypt_asymmetric)
    pub fn decrypt_asymmetric(&self, ciphertext: &str, key: &IdentityPrivateKey) -> Result<String> {
        let ciphertext = encoding::decode(ciphertext)?;
        let plaintext = key.decrypt(&ciphertext)?;
        String::from_utf8(plaintext)
            .map_err(|_| Error::DecodingFailed("Decrypted payload is not valid UTF-8".into()))
    }

    // ========================================================================
    // SYMMETRIC ENVELOPE CIPHER
    // ========================================================================

    /// Generate a fresh 256-bit envelope key
    pub fn generate_envelope_key(&self) -> Result<EnvelopeKey> {
        EnvelopeKey::generate()
    }

    /// Export an envelope key's raw bytes as base64 text
    pub fn export_envelope_key(&self, key: &EnvelopeKey) -> String {
        key.export()
    }

    /// Import an envelope key from base64 text
    pub fn import_envelope_key(&self, text: &str) -> Result<EnvelopeKey> {
        EnvelopeKey::import(text)
    }

    /// Encrypt a message body under an envelope key
    ///
    /// Generates a fresh random nonce internally on every call.
    pub fn encrypt(&self, plaintext: &str, key: &EnvelopeKey) -> Result<EncryptedMessage> {
        envelope::encrypt(plaintext, key)
    }

    /// Decrypt a message body, verifying the authentication tag first
    pub fn decrypt(&self, ciphertext: &str, nonce: &str, key: &EnvelopeKey) -> Result<String> {
        envelope::decrypt(ciphertext, nonce, key)
    }

    // ========================================================================
    // KEY WRAPPING
    // ========================================================================

    /// Wrap an envelope key for one recipient
    pub fn wrap_key(&self, key: &EnvelopeKey, recipient: &IdentityPublicKey) -> Result<WrappedKey> {
        wrap::wrap_key(key, recipient)
    }

    /// Unwrap an envelope key with the recipient's private key
    pub fn unwrap_key(
        &self,
        wrapped: &WrappedKey,
        key: &IdentityPrivateKey,
    ) -> Result<EnvelopeKey> {
        wrap::unwrap_key(wrapped, key)
    }

    // ========================================================================
    // PASSWORD-DERIVED KEYS
    // ========================================================================

    /// Derive an envelope key from a password and salt
    ///
    /// Uses the configured iteration count. Expensive by design, so run off
    /// the main execution path in interactive systems.
    pub fn derive_key(&self, password: &str, salt: &[u8]) -> Result<EnvelopeKey> {
        kdf::derive_key(password, salt, self.config.pbkdf2_iterations)
    }

    /// Generate a random salt for [`derive_key`](Self::derive_key)
    pub fn generate_salt(&self) -> Result<Vec<u8>> {
        random::generate_salt()
    }

    // ========================================================================
    // UTILITY PRIMITIVES
    // ========================================================================

    /// Generate a secure random token at the configured default length
    pub fn generate_secure_token(&self) -> Result<String> {
        random::generate_secure_token(self.config.token_length)
    }

    /// Generate a secure random token of an explicit byte length
    pub fn generate_secure_token_with_length(&self, length: usize) -> Result<String> {
        random::generate_secure_token(length)
    }

    /// Hash text with SHA-512, returning the digest as base64
    pub fn hash_data(&self, data: &str) -> String {
        hashing::hash_data(data)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MessageRecord;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// Smaller modulus and iteration count keep the suite fast; the code
    /// paths are identical to the 4096-bit / 310k-iteration defaults.
    fn test_provider() -> CryptoProvider {
        CryptoProvider::with_config(CryptoConfig {
            modulus_bits: 2048,
            pbkdf2_iterations: 1_000,
            token_length: 32,
        })
        .unwrap()
    }

    #[test]
    fn test_default_construction() {
        let provider = CryptoProvider::new().unwrap();
        assert_eq!(provider.config().modulus_bits, 4096);
        assert_eq!(provider.config().pbkdf2_iterations, 310_000);
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let result = CryptoProvider::with_config(CryptoConfig {
            modulus_bits: 512,
            ..CryptoConfig::default()
        });
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoProvider>();
    }

    #[test]
    fn test_end_to_end_alice_to_bob() {
        let provider = test_provider();

        // Identity setup
        let alice = provider.generate_key_pair().unwrap();
        let bob = provider.generate_key_pair().unwrap();

        // Alice encrypts a message and wraps the envelope key for both
        // herself and Bob
        let envelope_key = provider.generate_envelope_key().unwrap();
        let body = provider.encrypt("hello", &envelope_key).unwrap();
        let for_alice = provider.wrap_key(&envelope_key, &alice.public).unwrap();
        let for_bob = provider.wrap_key(&envelope_key, &bob.public).unwrap();

        // Bob's side: only text crossed the boundary
        let bob_key = provider.unwrap_key(&for_bob, &bob.private).unwrap();
        assert_eq!(
            provider.decrypt(&body.ciphertext, &body.nonce, &bob_key).unwrap(),
            "hello"
        );

        // Alice can still read her own copy
        let alice_key = provider.unwrap_key(&for_alice, &alice.private).unwrap();
        assert_eq!(
            provider.decrypt(&body.ciphertext, &body.nonce, &alice_key).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_end_to_end_through_exported_keys() {
        let provider = test_provider();

        // Bob's keys take a round trip through persistable text, as they
        // would through any real storage or transport
        let bob = provider.generate_key_pair().unwrap();
        let bob_public_text = provider.export_public_key(&bob.public).unwrap();
        let bob_private_text = provider.export_private_key(&bob.private).unwrap();

        let bob_public = provider.import_public_key(&bob_public_text).unwrap();
        let bob_private = provider.import_private_key(&bob_private_text).unwrap();

        let envelope_key = provider.generate_envelope_key().unwrap();
        let body = provider.encrypt("restored keys", &envelope_key).unwrap();
        let wrapped = provider.wrap_key(&envelope_key, &bob_public).unwrap();

        let unwrapped = provider.unwrap_key(&wrapped, &bob_private).unwrap();
        assert_eq!(
            provider.decrypt(&body.ciphertext, &body.nonce, &unwrapped).unwrap(),
            "restored keys"
        );
    }

    #[test]
    fn test_asymmetric_text_round_trip() {
        let provider = test_provider();
        let pair = provider.generate_key_pair().unwrap();

        let ciphertext = provider.encrypt_asymmetric("short payload", &pair.public).unwrap();
        assert_eq!(
            provider.decrypt_asymmetric(&ciphertext, &pair.private).unwrap(),
            "short payload"
        );
    }

    #[test]
    fn test_derive_key_uses_configured_iterations() {
        let provider = test_provider();
        let salt = provider.generate_salt().unwrap();

        let derived = provider.derive_key("passphrase", &salt).unwrap();
        let direct = crate::kdf::derive_key("passphrase", &salt, 1_000).unwrap();

        assert_eq!(derived.export(), direct.export());
    }

    #[test]
    fn test_token_uses_configured_length() {
        let provider = test_provider();

        assert_eq!(provider.generate_secure_token().unwrap().len(), 64);
        assert_eq!(
            provider.generate_secure_token_with_length(8).unwrap().len(),
            16
        );
    }

    #[test]
    fn test_message_record_assembly() {
        let provider = test_provider();

        let alice = provider.generate_key_pair().unwrap();
        let bob = provider.generate_key_pair().unwrap();

        let envelope_key = provider.generate_envelope_key().unwrap();
        let body = provider.encrypt("persisted conversation", &envelope_key).unwrap();

        let record = MessageRecord {
            ciphertext: body.ciphertext,
            nonce: body.nonce,
            wrapped_keys: BTreeMap::from([
                (
                    "alice".to_string(),
                    provider.wrap_key(&envelope_key, &alice.public).unwrap(),
                ),
                (
                    "bob".to_string(),
                    provider.wrap_key(&envelope_key, &bob.public).unwrap(),
                ),
            ]),
        };

        // Through JSON and back, then decrypt as Bob
        let json = serde_json::to_string(&record).unwrap();
        let restored: MessageRecord = serde_json::from_str(&json).unwrap();

        let bob_key = provider
            .unwrap_key(&restored.wrapped_keys["bob"], &bob.private)
            .unwrap();
        assert_eq!(
            provider.decrypt(&restored.ciphertext, &restored.nonce, &bob_key).unwrap(),
            "persisted conversation"
        );
    }

    #[test]
    fn test_concurrent_envelope_operations() {
        let provider = Arc::new(test_provider());
        let key = Arc::new(provider.generate_envelope_key().unwrap());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let provider = Arc::clone(&provider);
                let key = Arc::clone(&key);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let plaintext = format!("worker {} message {}", worker, i);
                        let message = provider.encrypt(&plaintext, &key).unwrap();
                        let decrypted = provider
                            .decrypt(&message.ciphertext, &message.nonce, &key)
                            .unwrap();
                        assert_eq!(decrypted, plaintext);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
