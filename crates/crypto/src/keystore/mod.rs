//! EIP-2335 compatible encrypted keystore implementation
//!
//! This module reads and writes the password-protected key envelope defined by
//! EIP-2335. The format supports:
//!
//! - Password-based key derivation using scrypt or PBKDF2-HMAC-SHA256
//! - AES-128-CTR symmetric encryption
//! - SHA-256 checksum verification
//!
//! # Security Properties
//!
//! - The checksum is verified before any plaintext is produced
//! - A wrong password and a tampered ciphertext produce the same error
//! - Derived keys and decrypted secrets are zeroized on drop
//!
//! # Example
//!
//! ```rust,no_run
//! use vaultkey_crypto::keystore::{EncryptedKeystore, KdfParams, KeystoreBuilder};
//! use vaultkey_crypto::secure::SecretString;
//!
//! # fn main() -> Result<(), vaultkey_crypto::keystore::KeystoreError> {
//! let keystore = KeystoreBuilder::new()
//!     .secret(&[0x42; 32])
//!     .password(SecretString::from("my-strong-password".to_string()))
//!     .kdf(KdfParams::scrypt())
//!     .build()?;
//!
//! let json = keystore.to_json_pretty()?;
//!
//! let loaded = EncryptedKeystore::from_json(&json)?;
//! let secret = loaded.decrypt(&SecretString::from("my-strong-password".to_string()))?;
//! # let _ = secret;
//! # Ok(())
//! # }
//! ```

mod checksum;
mod cipher;
mod encrypted;
mod error;
mod hex_bytes;
mod kdf;
mod password;

pub use checksum::{compute_checksum, verify_checksum, ChecksumModule, CHECKSUM_FUNCTION};
pub use cipher::{
    decrypt_secret, encrypt_secret, generate_iv, CipherModule, CIPHER_FUNCTION, IV_LENGTH,
};
pub use encrypted::{CryptoModule, EncryptedKeystore, KeystoreBuilder, KEYSTORE_VERSION};
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{
    derive, generate_salt, pbkdf2_derive_key, scrypt_derive_key, KdfFunction, KdfModule,
    KdfParams, Pbkdf2Params, ScryptParams, PBKDF2_C, PBKDF2_PRF, SALT_LENGTH, SCRYPT_MAX_MEMORY,
    SCRYPT_N, SCRYPT_P, SCRYPT_R,
};
pub use password::{normalize_new_password, normalize_password};
