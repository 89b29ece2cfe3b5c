//! Keystore decryption key with automatic memory zeroing
//!
//! `DecryptionKey` holds the 32 bytes produced by the KDF. The first half is
//! the AES-128 key, the second half is mixed into the checksum. It ensures that:
//! - The key is zeroized when the struct is dropped, on every exit path
//! - Debug output doesn't expose the actual bytes
//! - The struct cannot be accidentally cloned

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the KDF output consumed by the keystore.
pub const DECRYPTION_KEY_SIZE: usize = 32;

/// Length of each half of the decryption key.
pub const HALF_KEY_SIZE: usize = 16;

/// Memory-safe container for the KDF output.
///
/// This struct intentionally does NOT implement `Clone`.
///
/// # Example
///
/// ```rust
/// use vaultkey_crypto::secure::DecryptionKey;
///
/// let mut bytes = [0u8; 32];
/// bytes[..16].copy_from_slice(&[1u8; 16]);
/// bytes[16..].copy_from_slice(&[2u8; 16]);
/// let key = DecryptionKey::new(bytes);
///
/// assert_eq!(key.cipher_key(), &[1u8; 16]);
/// assert_eq!(key.checksum_key(), &[2u8; 16]);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DecryptionKey {
    cipher_key: [u8; HALF_KEY_SIZE],
    checksum_key: [u8; HALF_KEY_SIZE],
}

impl DecryptionKey {
    /// Wrap a 32-byte KDF output.
    pub fn new(mut bytes: [u8; DECRYPTION_KEY_SIZE]) -> Self {
        let key = Self::split(&bytes);
        bytes.zeroize();
        key
    }

    /// Take the first 32 bytes of a longer KDF output.
    ///
    /// Returns `None` if fewer than 32 bytes are supplied.
    pub fn from_kdf_output(output: &[u8]) -> Option<Self> {
        if output.len() < DECRYPTION_KEY_SIZE {
            return None;
        }
        Some(Self::split(&output[..DECRYPTION_KEY_SIZE]))
    }

    fn split(bytes: &[u8]) -> Self {
        let mut cipher_key = [0u8; HALF_KEY_SIZE];
        let mut checksum_key = [0u8; HALF_KEY_SIZE];
        cipher_key.copy_from_slice(&bytes[..HALF_KEY_SIZE]);
        checksum_key.copy_from_slice(&bytes[HALF_KEY_SIZE..DECRYPTION_KEY_SIZE]);
        Self {
            cipher_key,
            checksum_key,
        }
    }

    /// The AES-128-CTR key: `dk[0..16]`.
    #[inline]
    pub fn cipher_key(&self) -> &[u8; HALF_KEY_SIZE] {
        &self.cipher_key
    }

    /// The checksum key: `dk[16..32]`.
    #[inline]
    pub fn checksum_key(&self) -> &[u8; HALF_KEY_SIZE] {
        &self.checksum_key
    }
}

impl std::fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("cipher_key", &"[REDACTED]")
            .field("checksum_key", &"[REDACTED]")
            .finish()
    }
}
