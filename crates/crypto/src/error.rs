//! Cryptographic error types

use thiserror::Error;

/// secp256k1 key errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Scalar is zero or not below the curve order
    #[error("invalid secret key bytes")]
    InvalidSecretKey,
}
