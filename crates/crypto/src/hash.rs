//! Hashing utilities.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// RIPEMD-160(SHA-256(data)), used for BIP-32 key fingerprints.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(&[data]));
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256(&[]),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn test_sha256_parts_concatenate() {
        assert_eq!(
            sha256(&[b"hello ".as_slice(), b"world".as_slice()]),
            sha256(&[b"hello world".as_slice()])
        );
    }

    #[test]
    fn test_hash160_generator_point() {
        // Compressed generator point, i.e. the public key of private key 1.
        let g = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        assert_eq!(hash160(&g), hex!("751e76e8199196d454941c45d1b3a323f1433bd6"));
    }
}
