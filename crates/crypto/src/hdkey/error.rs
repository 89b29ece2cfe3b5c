//! Error types for HD key derivation

use thiserror::Error;

/// Result type for HD key derivation
pub type HdResult<T> = Result<T, HdError>;

/// Errors that can occur while deriving extended keys
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HdError {
    /// Seed shorter than 16 or longer than 64 bytes
    #[error("invalid seed length: expected 16..=64 bytes, got {0}")]
    InvalidSeedLength(usize),

    /// The seed hashes to an unusable master scalar
    #[error("seed produces an invalid master key")]
    InvalidMasterKey,

    /// The child scalar at this index is zero or not below the curve order
    #[error("invalid child key at index {index:#010x}")]
    InvalidChildKey {
        /// Child index including the hardened bit
        index: u32,
    },

    /// Derivation path string could not be parsed
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// Depth would exceed 255
    #[error("maximum derivation depth exceeded")]
    MaxDepthExceeded,
}
