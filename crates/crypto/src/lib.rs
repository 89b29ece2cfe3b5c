//! Keystore and key-derivation primitives for vaultkey
//!
//! This crate provides:
//! - EIP-2335 keystore parsing, decryption and re-encryption (scrypt / PBKDF2,
//!   AES-128-CTR, SHA-256 checksum)
//! - BIP-32 hierarchical derivation over secp256k1
//! - EVM address derivation with EIP-55 rendering
//! - Zeroizing containers for every piece of secret material

pub mod error;
pub mod hash;
pub mod hdkey;
pub mod keystore;
pub mod secp256k1;
pub mod secure;

// Secp256k1 exports (EVM-compatible)
pub use secp256k1::{checksum_address, Secp256k1PublicKey, Secp256k1SecretKey};

// Error exports
pub use error::CryptoError;

// Secure memory exports
pub use secrecy::ExposeSecret;
pub use secure::{DecryptionKey, IntoSecret, SecretArray, SecretBytes, SecretString};

// Keystore exports
pub use keystore::{EncryptedKeystore, KdfFunction, KdfParams, KeystoreBuilder, KeystoreError};

// HD derivation exports
pub use hdkey::{
    derive_account, DerivationPath, DerivedAccount, ExtendedKey, HdError, PathSegment,
    DEFAULT_DERIVATION_PATH,
};
