//! # Persisted Record Shapes
//!
//! Field shapes for callers that choose to persist keys and messages.
//!
//! These structs fix only the *shape* of persisted state: every field is
//! boundary-safe text from the encoding layer, so the records drop into
//! JSON documents, query parameters, or flat files unchanged. No file
//! format or transport framing is imposed; that is the storage layer's
//! concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wrap::WrappedKey;

/// Persisted form of an identity key pair
///
/// ## Security Warning
///
/// `private_key` is the bare PKCS#8 export. Persist this record only
/// behind whatever protection the deployment provides (OS keystore,
/// passphrase-derived encryption, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityKeyRecord {
    /// Base64 SPKI export of the public key
    pub public_key: String,
    /// Base64 PKCS#8 export of the private key
    pub private_key: String,
}

/// Persisted form of a password-derived key
///
/// Only the salt is stored; the key itself is re-derived from the
/// password on demand and never touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordKeyRecord {
    /// Base64-encoded salt (not secret)
    pub salt: String,
}

/// Persisted form of one encrypted message
///
/// One ciphertext body, one nonce, and one wrapped envelope key per
/// recipient, keyed by whatever recipient identifier the caller uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Base64 ciphertext of the message body (tag appended)
    pub ciphertext: String,
    /// Base64 nonce for the body encryption
    pub nonce: String,
    /// Wrapped envelope key per recipient
    pub wrapped_keys: BTreeMap<String, WrappedKey>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_record_json_round_trip() {
        let record = MessageRecord {
            ciphertext: "Y2lwaGVy".into(),
            nonce: "bm9uY2U=".into(),
            wrapped_keys: BTreeMap::from([
                ("alice".to_string(), WrappedKey::from_text("d3JhcHBlZA==")),
                ("bob".to_string(), WrappedKey::from_text("a2V5Y29weQ==")),
            ]),
        };

        let json = serde_json::to_string(&record).unwrap();
        let restored: MessageRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, restored);
    }

    #[test]
    fn test_record_fields_are_flat_text() {
        let record = PasswordKeyRecord {
            salt: "c2FsdA==".into(),
        };
        let json = serde_json::to_value(&record).unwrap();

        assert!(json["salt"].is_string());
    }

    #[test]
    fn test_identity_record_round_trip() {
        let record = IdentityKeyRecord {
            public_key: "cHVibGlj".into(),
            private_key: "cHJpdmF0ZQ==".into(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let restored: IdentityKeyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
