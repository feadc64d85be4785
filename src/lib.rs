//! # Vesper Core
//!
//! End-to-end encryption core for Vesper: a hybrid public-key/symmetric-key
//! envelope for short text payloads between identified parties, plus the
//! key-management primitives around it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        VESPER CORE MODULES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       CryptoProvider                             │  │
//! │  │   validated config + CSPRNG probe, one method per operation      │  │
//! │  └───────┬──────────┬──────────┬──────────┬──────────┬──────────────┘  │
//! │          │          │          │          │          │                 │
//! │  ┌───────▼───┐ ┌────▼─────┐ ┌──▼───────┐ ┌▼────────┐ ┌▼─────────────┐  │
//! │  │ Identity  │ │ Envelope │ │   Wrap   │ │   KDF   │ │ Random/Hash  │  │
//! │  │           │ │          │ │          │ │         │ │              │  │
//! │  │ RSA-OAEP  │ │ AES-256  │ │ RSA over │ │ PBKDF2- │ │ hex tokens,  │  │
//! │  │ 4096/SHA- │ │ -GCM,    │ │ envelope │ │ HMAC-   │ │ SHA-512      │  │
//! │  │ 512, SPKI │ │ random   │ │ key      │ │ SHA512, │ │ digests      │  │
//! │  │ / PKCS#8  │ │ nonces   │ │ bytes    │ │ 310k it │ │              │  │
//! │  └───────────┘ └──────────┘ └──────────┘ └─────────┘ └──────────────┘  │
//! │          │          │          │          │          │                 │
//! │  ┌───────▼──────────▼──────────▼──────────▼──────────▼──────────────┐  │
//! │  │                       Encoding Layer                             │  │
//! │  │     base64 text at every boundary; no raw buffers cross          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Hybrid Envelope
//!
//! A sender generates (or reuses) a symmetric envelope key, encrypts the
//! message body with it once, then wraps that key under each recipient's
//! public key. What travels is `{ciphertext, nonce, wrapped-key-per-
//! recipient}`; each recipient unwraps with their private key and decrypts
//! the shared body. The expensive, size-bounded asymmetric operation only
//! ever touches the 32-byte key.
//!
//! ```
//! use vesper_core::CryptoProvider;
//!
//! # fn main() -> vesper_core::Result<()> {
//! let crypto = CryptoProvider::new()?;
//!
//! let bob = crypto.generate_key_pair()?;
//!
//! // Alice's side
//! let envelope_key = crypto.generate_envelope_key()?;
//! let body = crypto.encrypt("hello", &envelope_key)?;
//! let for_bob = crypto.wrap_key(&envelope_key, &bob.public)?;
//!
//! // Bob's side
//! let key = crypto.unwrap_key(&for_bob, &bob.private)?;
//! assert_eq!(crypto.decrypt(&body.ciphertext, &body.nonce, &key)?, "hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Model
//!
//! | Concern | Design |
//! |---------|--------|
//! | Nonce reuse | Nonces are drawn inside `encrypt()`; callers cannot supply one |
//! | Key misuse | Public and private keys are distinct types; wrong use does not compile |
//! | Oracle leakage | Decrypt/auth failures are opaque: corruption, tampering, and key mismatch are indistinguishable |
//! | Key hygiene | Secret-carrying types zeroize on drop; `Debug` never prints key material |
//! | Missing backend | CSPRNG probed at provider construction, not at first use |
//!
//! This crate is the envelope primitive, not a messaging protocol: there is
//! no forward secrecy, ratcheting, or replay protection here; a
//! higher-level protocol supplies those on top.
//!
//! ## Concurrency
//!
//! Every operation is a pure function of its inputs plus the system random
//! source; there is no shared mutable state, and all types are safe to use
//! across threads. Key generation and password derivation are the two
//! operations expensive enough (hundreds of milliseconds) to keep off an
//! interactive main path.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod hashing;
pub mod identity;
pub mod kdf;
pub mod provider;
pub mod random;
pub mod records;
pub mod wrap;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{
    CryptoConfig, DEFAULT_MODULUS_BITS, DEFAULT_PBKDF2_ITERATIONS, DEFAULT_TOKEN_LENGTH,
};
pub use envelope::{
    EncryptedMessage, EnvelopeKey, KEY_SIZE as ENVELOPE_KEY_SIZE, NONCE_SIZE, TAG_SIZE,
};
pub use error::{Error, Result};
pub use identity::{IdentityKeyPair, IdentityPrivateKey, IdentityPublicKey};
pub use provider::CryptoProvider;
pub use random::SALT_SIZE;
pub use records::{IdentityKeyRecord, MessageRecord, PasswordKeyRecord};
pub use wrap::WrappedKey;
