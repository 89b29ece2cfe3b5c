//! Secp256k1 key handling for EVM-compatible accounts
//!
//! This module turns a derived private scalar into:
//! - its public point (scalar multiplication by the generator)
//! - the EVM address `keccak256(uncompressed_pubkey[1..])[12..]`
//!
//! Uses the k256 crate for secp256k1 curve operations.

use crate::error::CryptoError;
use alloy_primitives::{keccak256, Address};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey as K256SecretKey};
use zeroize::Zeroizing;

/// Secp256k1 secret key (32 bytes scalar)
///
/// The inner k256 key is zeroized on drop.
#[derive(Clone)]
pub struct Secp256k1SecretKey(K256SecretKey);

impl Secp256k1SecretKey {
    /// Load from raw bytes (32 bytes scalar)
    ///
    /// Fails for zero and for values not below the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        K256SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Serialize to bytes (32 bytes scalar, big-endian)
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// Lowercase hex of the scalar, without `0x` prefix
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(self.0.public_key())
    }

    pub(crate) fn as_k256(&self) -> &K256SecretKey {
        &self.0
    }
}

impl From<K256SecretKey> for Secp256k1SecretKey {
    fn from(key: K256SecretKey) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for Secp256k1SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::PublicKey);

impl Secp256k1PublicKey {
    /// Serialize to compressed bytes (33 bytes)
    pub fn to_bytes(&self) -> [u8; 33] {
        let encoded = self.0.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn to_uncompressed_bytes(&self) -> [u8; 65] {
        let encoded = self.0.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Derive EVM address from this public key
    ///
    /// Uses keccak256(uncompressed_pubkey[1..])[12..] (Ethereum address format, 20 bytes)
    pub fn evm_address(&self) -> Address {
        let uncompressed = self.to_uncompressed_bytes();
        // Skip the 0x04 prefix byte
        let hash = keccak256(&uncompressed[1..]);
        Address::from_slice(&hash[12..])
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.to_bytes()))
    }
}

/// Public point of a private scalar.
pub fn public_key(secret: &Secp256k1SecretKey) -> Secp256k1PublicKey {
    secret.public_key()
}

/// 20-byte account address of a public point.
pub fn address(public: &Secp256k1PublicKey) -> Address {
    public.evm_address()
}

/// EIP-55 mixed-case rendering of an address, with `0x` prefix.
pub fn checksum_address(address: &Address) -> String {
    address.to_checksum(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn key_one() -> Secp256k1SecretKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Secp256k1SecretKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_rejects_zero_and_order() {
        assert_eq!(
            Secp256k1SecretKey::from_bytes(&[0u8; 32]).unwrap_err(),
            CryptoError::InvalidSecretKey
        );

        let order = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
        assert!(Secp256k1SecretKey::from_bytes(&order).is_err());
    }

    #[test]
    fn test_public_key_of_one_is_generator() {
        let public = public_key(&key_one());
        assert_eq!(
            public.to_bytes(),
            hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
    }

    #[test]
    fn test_evm_address_known_vector() {
        // Private key 0x...01 controls 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf
        let addr = address(&public_key(&key_one()));
        assert_eq!(
            addr,
            Address::from(hex!("7E5F4552091A69125d5DfCb7b8C2659029395Bdf"))
        );
        assert_eq!(
            checksum_address(&addr),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_uncompressed_bytes() {
        let public = key_one().public_key();
        let uncompressed = public.to_uncompressed_bytes();

        assert_eq!(uncompressed[0], 0x04);

        // same point as the compressed form
        let compressed = public.to_bytes();
        assert_eq!(uncompressed[1..33], compressed[1..]);
        assert_eq!(compressed[0], 0x02 | (uncompressed[64] & 1));
    }

    #[test]
    fn test_secret_hex_and_debug() {
        let key = key_one();
        assert_eq!(
            key.to_hex().as_str(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert!(format!("{:?}", key).contains("[REDACTED]"));
    }
}
