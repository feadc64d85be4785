//! # Asymmetric Identity Keys
//!
//! Long-lived RSA-OAEP key pairs used for identity and key exchange.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          IDENTITY KEYS                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  IdentityKeyPair (RSA-OAEP, 4096-bit modulus, SHA-512 padding digest)  │
//! │  │                                                                      │
//! │  ├── IdentityPublicKey                                                 │
//! │  │   • Shareable with anyone                                           │
//! │  │   • Encrypt / wrap ONLY (the type has no decrypt operation)         │
//! │  │   • Exported as SPKI DER, base64-encoded                            │
//! │  │                                                                      │
//! │  └── IdentityPrivateKey                                                │
//! │      • Never leaves the holder's trust boundary                        │
//! │      • Decrypt / unwrap ONLY (the type has no encrypt operation)       │
//! │      • Exported as PKCS#8 DER, base64-encoded                          │
//! │      • Zeroized on drop                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The public/private split is enforced by the type system: there is no way
//! to decrypt with an [`IdentityPublicKey`] or encrypt with an
//! [`IdentityPrivateKey`]. The remaining runtime confusion (feeding an
//! exported private key to public-key import, or vice versa) fails with
//! [`Error::KeyUsage`].
//!
//! ## Payload Bound
//!
//! Direct RSA encryption is bounded by the modulus: a 4096-bit modulus with
//! SHA-512 OAEP padding carries at most 382 bytes of plaintext. This path
//! exists to wrap symmetric envelope keys and digests, never message bodies
//! (see [`crate::wrap`] for the hybrid construction).
//!
//! ## Cost
//!
//! Key generation takes hundreds of milliseconds. It is an identity-setup
//! operation; callers integrating with an interactive system should run it
//! off the main execution path.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha512;

use crate::encoding;
use crate::error::{Error, Result};

/// SHA-512 output size in bytes; the OAEP digest bound into the padding
const OAEP_DIGEST_SIZE: usize = 64;

/// An RSA-OAEP key pair generated together for one identity
///
/// The pair is exclusively owned: the public half is freely shareable, the
/// private half must never leave the holder's trust boundary. There is no
/// revocation in this module; discarding the pair is its end of life.
pub struct IdentityKeyPair {
    /// Public half (encrypt / wrap)
    pub public: IdentityPublicKey,
    /// Private half (decrypt / unwrap)
    pub private: IdentityPrivateKey,
}

impl IdentityKeyPair {
    /// Generate a new identity key pair
    ///
    /// Uses the operating system's secure random number generator. This is
    /// computationally expensive (hundreds of milliseconds at 4096 bits):
    /// call it once per identity, never per operation.
    pub fn generate(modulus_bits: usize) -> Result<Self> {
        let started = std::time::Instant::now();

        let private = RsaPrivateKey::new(&mut OsRng, modulus_bits)
            .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;
        let public = RsaPublicKey::from(&private);

        tracing::debug!(
            "Generated {}-bit identity key pair in {:?}",
            modulus_bits,
            started.elapsed()
        );

        Ok(Self {
            public: IdentityPublicKey { key: public },
            private: IdentityPrivateKey { key: private },
        })
    }
}

/// The shareable, encrypt-only half of an identity key pair
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityPublicKey {
    key: RsaPublicKey,
}

impl IdentityPublicKey {
    /// Export as base64-encoded SPKI DER
    pub fn export(&self) -> Result<String> {
        let der = self
            .key
            .to_public_key_der()
            .map_err(|e| Error::InvalidKey(format!("Failed to encode public key: {}", e)))?;
        Ok(encoding::encode(der.as_bytes()))
    }

    /// Import from base64-encoded SPKI DER
    ///
    /// The imported key is usable only for encryption and wrapping. Feeding
    /// an exported *private* key here fails with [`Error::KeyUsage`].
    pub fn import(text: &str) -> Result<Self> {
        let der = encoding::decode(text)?;
        match RsaPublicKey::from_public_key_der(&der) {
            Ok(key) => Ok(Self { key }),
            Err(e) => {
                if RsaPrivateKey::from_pkcs8_der(&der).is_ok() {
                    Err(Error::KeyUsage(
                        "A private key was supplied where a public key was expected".into(),
                    ))
                } else {
                    Err(Error::InvalidKey(format!("Invalid SPKI public key: {}", e)))
                }
            }
        }
    }

    /// Encrypt a short payload with RSA-OAEP (SHA-512 padding digest)
    ///
    /// Bounded by [`max_plaintext_len`](Self::max_plaintext_len); over-long
    /// input fails with [`Error::EncryptionFailed`] before touching the key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let bound = self.max_plaintext_len();
        if plaintext.len() > bound {
            return Err(Error::EncryptionFailed(format!(
                "Plaintext of {} bytes exceeds the {}-byte OAEP bound for this modulus",
                plaintext.len(),
                bound
            )));
        }

        self.key
            .encrypt(&mut OsRng, Oaep::new::<Sha512>(), plaintext)
            .map_err(|e| Error::EncryptionFailed(e.to_string()))
    }

    /// Maximum plaintext length in bytes for direct encryption
    ///
    /// `modulus_bytes - 2 * digest_size - 2` per the OAEP construction
    /// (382 bytes at 4096 bits).
    pub fn max_plaintext_len(&self) -> usize {
        self.key.size().saturating_sub(2 * OAEP_DIGEST_SIZE + 2)
    }

    /// Modulus size in bits
    pub fn modulus_bits(&self) -> usize {
        self.key.n().bits()
    }
}

impl std::fmt::Debug for IdentityPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityPublicKey")
            .field("modulus_bits", &self.modulus_bits())
            .finish_non_exhaustive()
    }
}

/// The secret, decrypt-only half of an identity key pair
///
/// The inner RSA key zeroizes its own material on drop.
pub struct IdentityPrivateKey {
    key: RsaPrivateKey,
}

impl IdentityPrivateKey {
    /// Export as base64-encoded PKCS#8 DER
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit the result.
    pub fn export(&self) -> Result<String> {
        let der = self
            .key
            .to_pkcs8_der()
            .map_err(|e| Error::InvalidKey(format!("Failed to encode private key: {}", e)))?;
        Ok(encoding::encode(der.as_bytes()))
    }

    /// Import from base64-encoded PKCS#8 DER
    ///
    /// The imported key is usable only for decryption and unwrapping.
    /// Feeding an exported *public* key here fails with [`Error::KeyUsage`].
    pub fn import(text: &str) -> Result<Self> {
        let der = encoding::decode(text)?;
        match RsaPrivateKey::from_pkcs8_der(&der) {
            Ok(key) => Ok(Self { key }),
            Err(e) => {
                if RsaPublicKey::from_public_key_der(&der).is_ok() {
                    Err(Error::KeyUsage(
                        "A public key was supplied where a private key was expected".into(),
                    ))
                } else {
                    Err(Error::InvalidKey(format!("Invalid PKCS#8 private key: {}", e)))
                }
            }
        }
    }

    /// Decrypt an RSA-OAEP ciphertext
    ///
    /// Fails with [`Error::DecryptionFailed`] on padding mismatch, wrong
    /// key, or corruption, indistinguishably, and never partially.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.key
            .decrypt(Oaep::new::<Sha512>(), ciphertext)
            .map_err(|_| Error::DecryptionFailed)
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> IdentityPublicKey {
        IdentityPublicKey {
            key: RsaPublicKey::from(&self.key),
        }
    }
}

impl std::fmt::Debug for IdentityPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("IdentityPrivateKey").finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
