//! SHA-256 checksum for keystore integrity and password verification
//!
//! The checksum is computed over `decryption_key[16..32] || ciphertext`. A
//! mismatch means either the password was wrong or the ciphertext was altered;
//! the two cases are not distinguished.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::{KeystoreError, KeystoreResult};
use crate::hash::sha256;
use crate::secure::DecryptionKey;

/// The only checksum function accepted
pub const CHECKSUM_FUNCTION: &str = "sha256";

/// SHA-256 digest length
pub const CHECKSUM_LENGTH: usize = 32;

/// Checksum module for EIP-2335 keystore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChecksumModule", into = "RawChecksumModule")]
pub struct ChecksumModule {
    checksum: [u8; CHECKSUM_LENGTH],
}

impl ChecksumModule {
    /// Wrap a computed checksum
    pub fn new(checksum: [u8; CHECKSUM_LENGTH]) -> Self {
        Self { checksum }
    }

    /// Compute the checksum for `ciphertext` under `key`
    pub fn compute(key: &DecryptionKey, ciphertext: &[u8]) -> Self {
        Self::new(compute_checksum(key, ciphertext))
    }

    /// Stored checksum bytes
    pub fn checksum(&self) -> &[u8; CHECKSUM_LENGTH] {
        &self.checksum
    }

    /// Recompute and compare in constant time
    pub fn verify(&self, key: &DecryptionKey, ciphertext: &[u8]) -> bool {
        verify_checksum(key, ciphertext, &self.checksum)
    }
}

/// `SHA-256(checksum_key || ciphertext)`
pub fn compute_checksum(key: &DecryptionKey, ciphertext: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    sha256(&[key.checksum_key().as_slice(), ciphertext])
}

/// True iff the recomputed checksum equals `expected`
pub fn verify_checksum(key: &DecryptionKey, ciphertext: &[u8], expected: &[u8]) -> bool {
    constant_time_eq(&compute_checksum(key, ciphertext), expected)
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Wire shape of the `checksum` object
#[derive(Serialize, Deserialize)]
struct RawChecksumModule {
    function: String,
    #[serde(default)]
    params: Value,
    message: String,
}

impl TryFrom<RawChecksumModule> for ChecksumModule {
    type Error = KeystoreError;

    fn try_from(raw: RawChecksumModule) -> KeystoreResult<Self> {
        if raw.function != CHECKSUM_FUNCTION {
            return Err(KeystoreError::UnsupportedChecksum(raw.function));
        }

        let bytes = hex::decode(&raw.message)
            .map_err(|e| KeystoreError::HexError(format!("checksum message: {}", e)))?;
        let checksum: [u8; CHECKSUM_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            KeystoreError::InvalidChecksumParams(format!(
                "message must be {} bytes, got {}",
                CHECKSUM_LENGTH,
                bytes.len()
            ))
        })?;

        Ok(Self { checksum })
    }
}

impl From<ChecksumModule> for RawChecksumModule {
    fn from(module: ChecksumModule) -> Self {
        Self {
            function: CHECKSUM_FUNCTION.to_string(),
            params: json!({}),
            message: hex::encode(module.checksum),
        }
    }
}
