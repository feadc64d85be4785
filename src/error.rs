//! # Error Handling
//!
//! This module provides the error types for Vesper Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Capability & Configuration                                        │
//! │  │   ├── CapabilityUnavailable  - No usable crypto backend / CSPRNG    │
//! │  │   └── InvalidConfig          - Rejected primitive parameters        │
//! │  │                                                                      │
//! │  ├── Encoding & Key Material                                           │
//! │  │   ├── DecodingFailed         - Malformed text input                 │
//! │  │   ├── InvalidKey             - Key bytes have wrong shape           │
//! │  │   ├── KeyUsage               - Key used for the wrong operation     │
//! │  │   └── KeyGenerationFailed    - Key pair generation failed           │
//! │  │                                                                      │
//! │  ├── Cipher Errors                                                     │
//! │  │   ├── EncryptionFailed       - Encryption operation failed          │
//! │  │   ├── DecryptionFailed       - Asymmetric decrypt / unwrap failed   │
//! │  │   ├── AuthenticationFailed   - AEAD tag did not verify              │
//! │  │   ├── KeyDerivationFailed    - PBKDF2 stretching failed             │
//! │  │   └── RngFailed              - Random source returned an error      │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      └── SerializationError     - Record (de)serialization failed      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Oracle Resistance
//!
//! `DecryptionFailed` and `AuthenticationFailed` deliberately carry no
//! payload. A decrypt failure must not reveal whether the ciphertext was
//! corrupted, tampered with, or decrypted under the wrong key: callers
//! (and attackers) see one indistinguishable failure. No error in this
//! module ever contains plaintext or key material.

use thiserror::Error;

/// Result type alias for Vesper Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Vesper Core
///
/// Every operation surfaces its error to the immediate caller unmodified.
/// Nothing is retried internally: cipher failures are deterministic for the
/// same bad input, so retrying without changing the input is pointless.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Capability & Configuration Errors (100-199)
    // ========================================================================
    /// No usable cryptographic backend is present (fatal, not retryable)
    #[error("Cryptographic capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Primitive parameters were rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Encoding & Key Material Errors (200-299)
    // ========================================================================
    /// Text input could not be decoded back into bytes
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// Key bytes have the wrong length or structure
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A key was used for an operation it is not authorized for
    #[error("Key usage violation: {0}")]
    KeyUsage(String),

    /// Key pair generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    // ========================================================================
    // Cipher Errors (300-399)
    // ========================================================================
    /// Encryption failed (e.g. plaintext exceeds the modulus bound)
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Asymmetric decryption or key unwrap failed
    ///
    /// Covers padding mismatch, key/ciphertext mismatch, and corruption
    /// indistinguishably.
    #[error("Decryption failed")]
    DecryptionFailed,

    /// AEAD authentication tag did not verify
    ///
    /// Covers corruption, tampering, and key mismatch indistinguishably.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Password-based key derivation failed
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    /// The system random source returned an error
    #[error("Random number generation failed")]
    RngFailed,

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================
    /// Record serialization or deserialization failed
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Get the numeric error code for boundary layers
    ///
    /// Error codes are organized by category:
    /// - 100-199: Capability & configuration
    /// - 200-299: Encoding & key material
    /// - 300-399: Cipher operations
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Capability & configuration (100-199)
            Error::CapabilityUnavailable(_) => 100,
            Error::InvalidConfig(_) => 101,

            // Encoding & key material (200-299)
            Error::DecodingFailed(_) => 200,
            Error::InvalidKey(_) => 201,
            Error::KeyUsage(_) => 202,
            Error::KeyGenerationFailed(_) => 203,

            // Cipher (300-399)
            Error::EncryptionFailed(_) => 300,
            Error::DecryptionFailed => 301,
            Error::AuthenticationFailed => 302,
            Error::KeyDerivationFailed(_) => 303,
            Error::RngFailed => 304,

            // Internal (900-999)
            Error::SerializationError(_) => 900,
        }
    }

    /// Check if this error is retryable
    ///
    /// Nothing in this module is: cipher failures are deterministic given
    /// the same input, and a missing capability does not come back. Callers
    /// may retry entire higher-level operations (e.g. re-fetch a key) at
    /// their discretion.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::CapabilityUnavailable("test".into()).code(), 100);
        assert_eq!(Error::DecodingFailed("test".into()).code(), 200);
        assert_eq!(Error::KeyUsage("test".into()).code(), 202);
        assert_eq!(Error::EncryptionFailed("test".into()).code(), 300);
        assert_eq!(Error::AuthenticationFailed.code(), 302);
        assert_eq!(Error::SerializationError("test".into()).code(), 900);
    }

    #[test]
    fn test_opaque_cipher_failures() {
        // Decrypt/auth failures must not leak structural detail
        assert_eq!(Error::DecryptionFailed.to_string(), "Decryption failed");
        assert_eq!(
            Error::AuthenticationFailed.to_string(),
            "Authentication failed"
        );
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!Error::RngFailed.is_retryable());
        assert!(!Error::DecryptionFailed.is_retryable());
        assert!(!Error::CapabilityUnavailable("gone".into()).is_retryable());
    }
}
