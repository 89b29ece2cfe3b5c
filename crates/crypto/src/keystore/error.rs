//! Keystore error types

use thiserror::Error;

/// Errors that can occur during keystore operations
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// Checksum verification failed after key derivation.
    ///
    /// Deliberately says nothing about which comparison failed.
    #[error("wrong password")]
    WrongPassword,

    /// Required envelope field is absent
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Unsupported KDF function
    #[error("unsupported KDF function: {0}")]
    UnsupportedKdf(String),

    /// Unsupported PBKDF2 pseudo-random function
    #[error("unsupported PBKDF2 prf: {0}")]
    UnsupportedPrf(String),

    /// Unsupported cipher function
    #[error("unsupported cipher function: {0}")]
    UnsupportedCipher(String),

    /// Unsupported checksum function
    #[error("unsupported checksum function: {0}")]
    UnsupportedChecksum(String),

    /// Envelope version other than 4
    #[error("unsupported keystore version: {0}")]
    UnsupportedVersion(u32),

    /// Invalid KDF parameters
    #[error("invalid KDF parameters: {0}")]
    InvalidKdfParams(String),

    /// Invalid cipher parameters
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// Invalid checksum parameters or message
    #[error("invalid checksum: {0}")]
    InvalidChecksumParams(String),

    /// `uuid` is not a UUID
    #[error("invalid uuid: {0}")]
    InvalidUuid(String),

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    KdfError(String),

    /// Password is empty after normalisation
    #[error("password must not be empty")]
    EmptyPassword,

    /// Invalid hex encoding
    #[error("invalid hex encoding: {0}")]
    HexError(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
