//! Secure memory handling for cryptographic material
//!
//! This module provides memory-safe containers for key material with:
//! - Automatic zeroing on drop via `zeroize`
//! - Debug output masking to prevent log exposure
//! - Prevention of accidental cloning
//!
//! Passwords, KDF output, decrypted seeds and chain codes all live in one of
//! these containers for exactly as long as the step consuming them runs.

mod material;
mod secret;

pub use material::{DecryptionKey, DECRYPTION_KEY_SIZE, HALF_KEY_SIZE};
pub use secret::{IntoSecret, SecretArray, SecretBytes, SecretString};
