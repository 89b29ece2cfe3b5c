//! BIP-32 extended private keys over secp256k1
//!
//! Each derivation step is a pure function from a parent `ExtendedKey` and a
//! `PathSegment` to a new `ExtendedKey`. Walking a path is a fold over its
//! segments; no chain state is shared between steps.

use hmac::{Hmac, Mac};
use k256::elliptic_curve::ff::PrimeField;
use k256::{FieldBytes, Scalar, SecretKey as K256SecretKey};
use sha2::Sha512;
use tracing::trace;
use zeroize::Zeroize;

use super::error::{HdError, HdResult};
use super::path::{DerivationPath, PathSegment};
use crate::hash::hash160;
use crate::secp256k1::{Secp256k1PublicKey, Secp256k1SecretKey};
use crate::secure::SecretArray;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the master node
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Seed length bounds accepted for the master key
pub const MIN_SEED_LENGTH: usize = 16;
pub const MAX_SEED_LENGTH: usize = 64;

/// BIP-32 extended private key.
///
/// The private scalar and chain code are zeroized on drop.
#[derive(Clone)]
pub struct ExtendedKey {
    private_key: Secp256k1SecretKey,
    chain_code: SecretArray<32>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
}

impl ExtendedKey {
    /// Master key: `HMAC-SHA512(key = "Bitcoin seed", data = seed)`.
    ///
    /// The left half is the private scalar, the right half the chain code.
    pub fn master_from_seed(seed: &[u8]) -> HdResult<Self> {
        if !(MIN_SEED_LENGTH..=MAX_SEED_LENGTH).contains(&seed.len()) {
            return Err(HdError::InvalidSeedLength(seed.len()));
        }

        let mut mac = HmacSha512::new_from_slice(MASTER_KEY_DOMAIN)
            .map_err(|_| HdError::InvalidMasterKey)?;
        mac.update(seed);
        let mut output = [0u8; 64];
        output.copy_from_slice(&mac.finalize().into_bytes());

        let private_key = K256SecretKey::from_slice(&output[..32])
            .map(Secp256k1SecretKey::from)
            .map_err(|_| HdError::InvalidMasterKey);

        let chain_code = split_chain_code(&mut output);

        Ok(Self {
            private_key: private_key?,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
        })
    }

    /// Derive one child.
    ///
    /// Hardened: `HMAC-SHA512(chain_code, 0x00 || k_par || ser32(i))`.
    /// Normal: `HMAC-SHA512(chain_code, serP(K_par) || ser32(i))`.
    /// The child scalar is `IL + k_par mod n`; `IL >= n` or a zero result fails
    /// with `InvalidChildKey` rather than skipping to the next index.
    pub fn derive_child(&self, segment: PathSegment) -> HdResult<Self> {
        if self.depth == u8::MAX {
            return Err(HdError::MaxDepthExceeded);
        }

        let child_index = segment.child_number();
        let parent_public = self.public_key().to_bytes();

        let mut mac = HmacSha512::new_from_slice(self.chain_code.expose_secret())
            .map_err(|_| HdError::InvalidChildKey { index: child_index })?;

        if segment.is_hardened() {
            mac.update(&[0u8]);
            mac.update(self.private_key.to_bytes().as_slice());
        } else {
            mac.update(&parent_public);
        }
        mac.update(&child_index.to_be_bytes());

        let mut output = [0u8; 64];
        output.copy_from_slice(&mac.finalize().into_bytes());
        let private_key = add_tweak(&self.private_key, &output[..32], child_index);

        let chain_code = split_chain_code(&mut output);

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&hash160(&parent_public)[..4]);

        trace!(depth = self.depth + 1, child_index, "derived child key");

        Ok(Self {
            private_key: private_key?,
            chain_code,
            depth: self.depth + 1,
            parent_fingerprint,
            child_index,
        })
    }

    /// Walk `path` from this key, in order.
    pub fn derive_path(&self, path: &DerivationPath) -> HdResult<Self> {
        path.segments()
            .iter()
            .try_fold(self.clone(), |key, segment| key.derive_child(*segment))
    }

    /// The private scalar
    #[inline]
    pub fn private_key(&self) -> &Secp256k1SecretKey {
        &self.private_key
    }

    /// The public point of the private scalar
    pub fn public_key(&self) -> Secp256k1PublicKey {
        self.private_key.public_key()
    }

    /// The chain code
    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        self.chain_code.expose_secret()
    }

    /// Depth in the tree (0 for master)
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// First 4 bytes of HASH160 of the parent's compressed public key
    #[inline]
    pub fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Child number that produced this key (hardened bit included)
    #[inline]
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// This key's own fingerprint
    pub fn fingerprint(&self) -> [u8; 4] {
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&hash160(&self.public_key().to_bytes())[..4]);
        fingerprint
    }
}

/// Take the right half of an HMAC output as chain code and wipe the output.
fn split_chain_code(output: &mut [u8; 64]) -> SecretArray<32> {
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&output[32..]);
    output.zeroize();

    let secret = SecretArray::new(chain_code);
    chain_code.zeroize();
    secret
}

/// `parse256(IL) + k_par (mod n)`, rejecting `IL >= n` and a zero sum.
fn add_tweak(
    parent: &Secp256k1SecretKey,
    il: &[u8],
    child_index: u32,
) -> HdResult<Secp256k1SecretKey> {
    let invalid = || HdError::InvalidChildKey { index: child_index };

    let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(il)).into();
    let tweak = tweak.ok_or_else(invalid)?;

    let parent_scalar: Scalar = *parent.as_k256().to_nonzero_scalar();
    let child_scalar = parent_scalar + tweak;

    K256SecretKey::from_bytes(&child_scalar.to_bytes())
        .map(Secp256k1SecretKey::from)
        .map_err(|_| invalid())
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index)
            .field("private_key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // BIP-32 test vector 1
    const TEST_SEED_1: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
    const HARDENED_INDEX_0: u32 = 0x8000_0000;

    #[test]
    fn test_master_key_from_seed() {
        let master = ExtendedKey::master_from_seed(&TEST_SEED_1).unwrap();

        assert_eq!(master.depth(), 0);
        assert_eq!(master.child_index(), 0);
        assert_eq!(master.parent_fingerprint(), &[0u8; 4]);
        assert_eq!(
            *master.private_key().to_bytes(),
            hex!("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
        );
        assert_eq!(
            master.chain_code(),
            &hex!("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508")
        );
        assert_eq!(master.fingerprint(), hex!("3442193e"));
    }

    #[test]
    fn test_hardened_then_normal_child() {
        let master = ExtendedKey::master_from_seed(&TEST_SEED_1).unwrap();

        let child = master
            .derive_child(PathSegment::hardened(0).unwrap())
            .unwrap();
        assert_eq!(child.depth(), 1);
        assert_eq!(child.child_index(), HARDENED_INDEX_0);
        assert_eq!(child.parent_fingerprint(), &hex!("3442193e"));
        assert_eq!(
            *child.private_key().to_bytes(),
            hex!("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
        );

        let grandchild = child.derive_child(PathSegment::normal(1).unwrap()).unwrap();
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.parent_fingerprint(), &hex!("5c1bd648"));
        assert_eq!(
            *grandchild.private_key().to_bytes(),
            hex!("3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368")
        );
        assert_eq!(
            grandchild.chain_code(),
            &hex!("2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19")
        );
    }

    #[test]
    fn test_derive_path_matches_stepwise() {
        let master = ExtendedKey::master_from_seed(&TEST_SEED_1).unwrap();
        let path: DerivationPath = "m/0'/1".parse().unwrap();

        let walked = master.derive_path(&path).unwrap();
        let stepped = master
            .derive_child(PathSegment::hardened(0).unwrap())
            .unwrap()
            .derive_child(PathSegment::normal(1).unwrap())
            .unwrap();

        assert_eq!(*walked.private_key().to_bytes(), *stepped.private_key().to_bytes());
        assert_eq!(walked.chain_code(), stepped.chain_code());
    }

    #[test]
    fn test_empty_path_returns_master() {
        let master = ExtendedKey::master_from_seed(&TEST_SEED_1).unwrap();
        let same = master.derive_path(&DerivationPath::default()).unwrap();
        assert_eq!(*same.private_key().to_bytes(), *master.private_key().to_bytes());
        assert_eq!(same.depth(), 0);
    }

    #[test]
    fn test_seed_length_bounds() {
        assert_eq!(
            ExtendedKey::master_from_seed(&[1u8; 15]).unwrap_err(),
            HdError::InvalidSeedLength(15)
        );
        assert_eq!(
            ExtendedKey::master_from_seed(&[1u8; 65]).unwrap_err(),
            HdError::InvalidSeedLength(65)
        );
        assert!(ExtendedKey::master_from_seed(&[1u8; 64]).is_ok());
    }

    #[test]
    fn test_tweak_at_or_above_order_is_rejected() {
        let parent = Secp256k1SecretKey::from_bytes(&[1u8; 32]).unwrap();
        let order = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

        assert_eq!(
            add_tweak(&parent, &order, 5).unwrap_err(),
            HdError::InvalidChildKey { index: 5 }
        );
        assert!(add_tweak(&parent, &[0xFF; 32], 5).is_err());
    }

    #[test]
    fn test_tweak_summing_to_zero_is_rejected() {
        // parent = 1, tweak = n - 1  =>  child = 0
        let mut one = [0u8; 32];
        one[31] = 1;
        let parent = Secp256k1SecretKey::from_bytes(&one).unwrap();
        let n_minus_one = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");

        assert!(matches!(
            add_tweak(&parent, &n_minus_one, 9),
            Err(HdError::InvalidChildKey { index: 9 })
        ));
    }

    #[test]
    fn test_debug_output_redacted() {
        let master = ExtendedKey::master_from_seed(&TEST_SEED_1).unwrap();
        let debug = format!("{:?}", master);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("e8f32e72"));
    }
}
