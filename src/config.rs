//! # Primitive Configuration
//!
//! Explicit, closed configuration for the cryptographic primitives.
//!
//! Every parameter the primitives take is named here and validated once at
//! provider construction. There is no loosely-typed parameter bag and no
//! call-time algorithm negotiation. The algorithm family itself is fixed:
//!
//! | Primitive | Algorithm | Fixed Parameters |
//! |-----------|-----------|------------------|
//! | Identity keys | RSA-OAEP | SHA-512 digest, e = 65537 |
//! | Envelope cipher | AES-256-GCM | 96-bit nonce, 128-bit tag |
//! | Password derivation | PBKDF2-HMAC-SHA512 | 256-bit output |
//! | Integrity hash | SHA-512 | — |
//!
//! Only parameters with legitimate deployment variation are tunable, and
//! weakening them below the defaults is rejected where it would silently
//! reduce security (iteration count, modulus size).

use crate::error::{Error, Result};

/// Default RSA modulus size in bits
pub const DEFAULT_MODULUS_BITS: usize = 4096;

/// Default PBKDF2 iteration count (OWASP-recommended for HMAC-SHA512)
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 310_000;

/// Default secure token length in bytes (renders as 64 hex characters)
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Configuration for a [`CryptoProvider`](crate::CryptoProvider)
///
/// Construct with [`CryptoConfig::default`] for the standard parameters,
/// or set fields explicitly and let provider construction validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfig {
    /// RSA modulus size in bits for identity key generation
    pub modulus_bits: usize,

    /// PBKDF2 iteration count for password-derived keys
    pub pbkdf2_iterations: u32,

    /// Default length in bytes for generated secure tokens
    pub token_length: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl CryptoConfig {
    /// Validate the configuration
    ///
    /// Called once at provider construction; operations never re-validate.
    pub fn validate(&self) -> Result<()> {
        match self.modulus_bits {
            2048 | 3072 | 4096 => {}
            other => {
                return Err(Error::InvalidConfig(format!(
                    "Unsupported RSA modulus size: {} bits (expected 2048, 3072, or 4096)",
                    other
                )));
            }
        }

        if self.pbkdf2_iterations < 1_000 {
            return Err(Error::InvalidConfig(format!(
                "PBKDF2 iteration count too low: {} (minimum 1000)",
                self.pbkdf2_iterations
            )));
        }

        if self.token_length == 0 || self.token_length > 1024 {
            return Err(Error::InvalidConfig(format!(
                "Token length out of range: {} (expected 1..=1024)",
                self.token_length
            )));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
