//! Seed-to-account derivation

use alloy_primitives::Address;
use tracing::debug;

use super::error::HdResult;
use super::extended::ExtendedKey;
use super::path::DerivationPath;
use crate::secp256k1::{address, checksum_address, Secp256k1PublicKey, Secp256k1SecretKey};

/// The leaf of a derivation: private key, public key and address.
#[derive(Debug)]
pub struct DerivedAccount {
    /// Path the key was derived at
    pub path: DerivationPath,
    /// Leaf private key (zeroized on drop)
    pub private_key: Secp256k1SecretKey,
    /// Leaf public key
    pub public_key: Secp256k1PublicKey,
    /// 20-byte account address
    pub address: Address,
}

impl DerivedAccount {
    /// EIP-55 checksummed address string
    pub fn checksum_address(&self) -> String {
        checksum_address(&self.address)
    }
}

/// Derive the account at `path` from a master seed.
pub fn derive_account(seed: &[u8], path: &DerivationPath) -> HdResult<DerivedAccount> {
    let master = ExtendedKey::master_from_seed(seed)?;
    let leaf = master.derive_path(path)?;

    let private_key = leaf.private_key().clone();
    let public_key = leaf.public_key();
    let address = address(&public_key);

    debug!(path = %path, depth = leaf.depth(), "derived account");

    Ok(DerivedAccount {
        path: path.clone(),
        private_key,
        public_key,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdkey::PathSegment;

    #[test]
    fn test_derive_account_deterministic() {
        let seed = [0x5Au8; 32];
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();

        let a = derive_account(&seed, &path).unwrap();
        let b = derive_account(&seed, &path).unwrap();

        assert_eq!(*a.private_key.to_bytes(), *b.private_key.to_bytes());
        assert_eq!(a.public_key, b.public_key);
        assert_eq!(a.address, b.address);
        assert_eq!(a.path.to_string(), "m/44'/60'/0'/0/0");
    }

    #[test]
    fn test_segment_order_matters() {
        let seed = [0x5Au8; 32];
        let one = PathSegment::normal(1).unwrap();
        let two = PathSegment::normal(2).unwrap();

        let ab = derive_account(&seed, &DerivationPath::new(vec![one, two])).unwrap();
        let ba = derive_account(&seed, &DerivationPath::new(vec![two, one])).unwrap();

        assert_ne!(ab.address, ba.address);
    }
}
