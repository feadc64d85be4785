//! # Secure Random Values
//!
//! Token and salt generation from the OS CSPRNG. Tokens are identifiers,
//! not keys; key material comes from the modules that own it.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

/// Size in bytes of a generated salt (see [`crate::kdf`])
pub const SALT_SIZE: usize = 16;

/// Generate a secure random token rendered as lowercase hex
///
/// `length` is the number of random bytes; the result is `2 * length`
/// hex characters. Suitable for session identifiers and similar, NOT a
/// cryptographic key.
pub fn generate_secure_token(length: usize) -> Result<String> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| Error::RngFailed)?;
    Ok(hex::encode(bytes))
}

/// Generate a random salt for password-based key derivation
///
/// The salt is not secret; persist it alongside the ciphertext it protects.
pub fn generate_salt() -> Result<Vec<u8>> {
    let mut salt = vec![0u8; SALT_SIZE];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|_| Error::RngFailed)?;
    Ok(salt)
}

// ============================================================================
// TESTS
// ============================================================================
