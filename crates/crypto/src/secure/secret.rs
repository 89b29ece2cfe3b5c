//! Secret wrapper utilities for consistent secret handling
//!
//! Provides type aliases and utilities around the `secrecy` crate for
//! handling passwords, decrypted seeds and other sensitive byte strings.

use secrecy::{SecretBox, SecretString as SecrecySecretString};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret byte vector that is zeroized on drop.
///
/// Decrypted keystore secrets (master seeds) are returned in this form.
/// The inner value can only be accessed via `expose_secret()`.
///
/// # Example
///
/// ```rust
/// use vaultkey_crypto::secure::SecretBytes;
/// use secrecy::ExposeSecret;
///
/// let seed = SecretBytes::new(Box::new(vec![1, 2, 3, 4]));
/// assert_eq!(seed.expose_secret(), &vec![1, 2, 3, 4]);
/// ```
pub type SecretBytes = SecretBox<Vec<u8>>;

/// A secret string that is zeroized on drop.
///
/// Keystore passwords travel through the crate in this form.
pub type SecretString = SecrecySecretString;

/// A fixed-size secret byte array.
///
/// Unlike `SecretBytes`, this is for fixed-size secrets like chain codes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretArray<const N: usize> {
    inner: [u8; N],
}

impl<const N: usize> SecretArray<N> {
    /// Create a new secret array from bytes.
    pub fn new(bytes: [u8; N]) -> Self {
        Self { inner: bytes }
    }

    /// Create a secret array by copying a slice of exactly `N` bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let mut inner = [0u8; N];
        if bytes.len() != N {
            return None;
        }
        inner.copy_from_slice(bytes);
        Some(Self { inner })
    }

    /// Expose the secret bytes.
    ///
    /// The returned reference should not be stored.
    pub fn expose_secret(&self) -> &[u8; N] {
        &self.inner
    }
}

impl<const N: usize> Clone for SecretArray<N> {
    fn clone(&self) -> Self {
        Self { inner: self.inner }
    }
}

impl<const N: usize> std::fmt::Debug for SecretArray<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretArray")
            .field("length", &N)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Extension trait for creating secret values.
pub trait IntoSecret {
    /// The secret type this converts into.
    type Secret;

    /// Convert into a secret value.
    fn into_secret(self) -> Self::Secret;
}

impl IntoSecret for String {
    type Secret = SecretString;

    fn into_secret(self) -> Self::Secret {
        self.into()
    }
}

impl IntoSecret for Vec<u8> {
    type Secret = SecretBytes;

    fn into_secret(self) -> Self::Secret {
        SecretBox::new(Box::new(self))
    }
}
