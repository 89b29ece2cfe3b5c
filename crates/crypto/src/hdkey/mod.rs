//! Hierarchical deterministic (BIP-32) key derivation over secp256k1
//!
//! A keystore seed is expanded into a master [`ExtendedKey`], which is then
//! walked along a [`DerivationPath`] one [`PathSegment`] at a time. The leaf
//! private scalar yields the account's public key and EVM address.
//!
//! # Example
//!
//! ```rust
//! use vaultkey_crypto::hdkey::{derive_account, DerivationPath, DEFAULT_DERIVATION_PATH};
//!
//! let seed = [0x42u8; 32];
//! let path: DerivationPath = DEFAULT_DERIVATION_PATH.parse().unwrap();
//! let account = derive_account(&seed, &path).unwrap();
//! println!("address: {}", account.checksum_address());
//! ```

mod account;
mod error;
mod extended;
mod path;

pub use account::{derive_account, DerivedAccount};
pub use error::{HdError, HdResult};
pub use extended::{ExtendedKey, MAX_SEED_LENGTH, MIN_SEED_LENGTH};
pub use path::{DerivationPath, PathSegment, DEFAULT_DERIVATION_PATH, HARDENED_BIT};
