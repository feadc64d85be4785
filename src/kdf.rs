//! # Password-Derived Keys
//!
//! Deterministic stretching of low-entropy passwords into envelope keys.
//!
//! ## Derivation
//!
//! ```text
//! PBKDF2-HMAC-SHA512(
//!     password   = user passphrase,
//!     salt       = random bytes, generated once per secret,
//!     iterations = 310,000 (default),
//!     output     = 32 bytes
//! )
//!       │
//!       ▼
//! EnvelopeKey (AES-256-GCM compatible)
//! ```
//!
//! The same `(password, salt)` always yields the same key, so a
//! passphrase-protected secret can be re-derived on demand without the key
//! itself ever being stored. The salt is not secret: generate it with
//! [`crate::random::generate_salt`] and persist it alongside the ciphertext
//! it protects. Reusing one salt across unrelated secrets re-enables
//! precomputed-table attacks.
//!
//! This is the slow, stretched path for passwords; for fingerprinting and
//! integrity checks use [`crate::hashing`] instead.
//!
//! No maximum password length is enforced here; minimum-strength policy
//! belongs to the calling layer.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroize;

use crate::envelope::{EnvelopeKey, KEY_SIZE};
use crate::error::{Error, Result};

/// Derive an envelope key from a password and salt
///
/// Deterministic given identical inputs. Expensive by design (hundreds of
/// milliseconds at the default iteration count), so run it off the main
/// execution path in interactive systems.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Result<EnvelopeKey> {
    if salt.is_empty() {
        return Err(Error::KeyDerivationFailed("Salt must not be empty".into()));
    }
    if iterations == 0 {
        return Err(Error::KeyDerivationFailed(
            "Iteration count must be non-zero".into(),
        ));
    }

    let started = std::time::Instant::now();

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, iterations, &mut key);

    tracing::debug!(
        "Derived envelope key from password ({} iterations) in {:?}",
        iterations,
        started.elapsed()
    );

    // Scrub the intermediate buffer; only the EnvelopeKey keeps the material
    let derived = EnvelopeKey::from_bytes(&key);
    key.zeroize();
    derived
}

// ============================================================================
// TESTS
// ============================================================================
