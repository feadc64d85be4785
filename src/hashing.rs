//! # Integrity Hashing
//!
//! One-way SHA-512 digests for fingerprinting and integrity checks.
//!
//! Deterministic and unstretched. Never use this for passwords; that is
//! what [`crate::kdf`] is for.

use sha2::{Digest, Sha512};

use crate::encoding;

/// Hash text data with SHA-512 and return the digest as base64
pub fn hash_data(data: &str) -> String {
    let digest = Sha512::digest(data.as_bytes());
    encoding::encode(&digest)
}

// ============================================================================
// TESTS
// ============================================================================
