//! AES-128-CTR cipher implementation for keystore encryption
//!
//! CTR mode is a stream cipher: ciphertext length equals plaintext length and
//! no padding is involved. Encryption and decryption are the same keystream
//! XOR.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::{DecryptionKey, IntoSecret, SecretBytes};

/// The only cipher function accepted
pub const CIPHER_FUNCTION: &str = "aes-128-ctr";

/// IV (initialization vector) length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// Type alias for AES-128-CTR cipher
type Aes128Ctr = Ctr128BE<Aes128>;

/// Cipher module for EIP-2335 keystore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCipherModule", into = "RawCipherModule")]
pub struct CipherModule {
    iv: [u8; IV_LENGTH],
    ciphertext: Vec<u8>,
}

impl CipherModule {
    /// Create a new AES-128-CTR cipher module
    pub fn new(iv: [u8; IV_LENGTH], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Encrypt `secret` under a fresh random IV
    pub fn encrypt(key: &DecryptionKey, secret: &[u8]) -> Self {
        let iv = generate_iv();
        let ciphertext = encrypt_secret(key, &iv, secret);
        Self::new(iv, ciphertext)
    }

    /// The IV
    pub fn iv(&self) -> &[u8; IV_LENGTH] {
        &self.iv
    }

    /// The ciphertext
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Decrypt the message using the provided decryption key
    pub fn decrypt(&self, key: &DecryptionKey) -> SecretBytes {
        decrypt_secret(key, &self.iv, &self.ciphertext)
    }
}

/// Encrypt secret data using AES-128-CTR keyed with `dk[0..16]`
pub fn encrypt_secret(key: &DecryptionKey, iv: &[u8; IV_LENGTH], secret: &[u8]) -> Vec<u8> {
    let mut cipher = Aes128Ctr::new(key.cipher_key().into(), iv.into());

    let mut ciphertext = secret.to_vec();
    cipher.apply_keystream(&mut ciphertext);
    ciphertext
}

/// Decrypt secret data using AES-128-CTR keyed with `dk[0..16]`
pub fn decrypt_secret(key: &DecryptionKey, iv: &[u8; IV_LENGTH], ciphertext: &[u8]) -> SecretBytes {
    let mut cipher = Aes128Ctr::new(key.cipher_key().into(), iv.into());

    let mut plaintext = ciphertext.to_vec();
    cipher.apply_keystream(&mut plaintext);
    plaintext.into_secret()
}

/// Generate a random IV
pub fn generate_iv() -> [u8; IV_LENGTH] {
    use rand::RngCore;
    let mut iv = [0u8; IV_LENGTH];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

/// Cipher parameters for AES-128-CTR
#[derive(Deserialize)]
struct RawCipherParams {
    iv: String,
}

/// Wire shape of the `cipher` object
#[derive(Serialize, Deserialize)]
struct RawCipherModule {
    function: String,
    #[serde(default)]
    params: Value,
    message: String,
}

impl TryFrom<RawCipherModule> for CipherModule {
    type Error = KeystoreError;

    fn try_from(raw: RawCipherModule) -> KeystoreResult<Self> {
        if raw.function != CIPHER_FUNCTION {
            return Err(KeystoreError::UnsupportedCipher(raw.function));
        }

        let params: RawCipherParams = serde_json::from_value(raw.params)
            .map_err(|e| KeystoreError::InvalidCipherParams(e.to_string()))?;
        let iv_bytes = hex::decode(&params.iv)
            .map_err(|e| KeystoreError::HexError(format!("cipher iv: {}", e)))?;
        let iv: [u8; IV_LENGTH] = iv_bytes.as_slice().try_into().map_err(|_| {
            KeystoreError::InvalidCipherParams(format!(
                "IV must be {} bytes, got {}",
                IV_LENGTH,
                iv_bytes.len()
            ))
        })?;

        let ciphertext = hex::decode(&raw.message)
            .map_err(|e| KeystoreError::HexError(format!("cipher message: {}", e)))?;

        Ok(Self { iv, ciphertext })
    }
}

impl From<CipherModule> for RawCipherModule {
    fn from(module: CipherModule) -> Self {
        Self {
            function: CIPHER_FUNCTION.to_string(),
            params: json!({ "iv": hex::encode(module.iv) }),
            message: hex::encode(&module.ciphertext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn key() -> DecryptionKey {
        DecryptionKey::new([0xAA; 32])
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let secret = b"my-secret-key-material-32-bytes!";
        let iv = [0xBB; 16];

        let ciphertext = encrypt_secret(&key(), &iv, secret);

        // Ciphertext should be same length as plaintext (CTR mode)
        assert_eq!(ciphertext.len(), secret.len());
        assert_ne!(&ciphertext, secret);

        let decrypted = decrypt_secret(&key(), &iv, &ciphertext);
        assert_eq!(decrypted.expose_secret(), secret);
    }

    #[test]
    fn test_ctr_mode_no_padding() {
        for len in [0, 1, 7, 15, 16, 17, 31, 32, 33, 64] {
            let secret = vec![0x42; len];
            let iv = [0xBB; 16];

            let ciphertext = encrypt_secret(&key(), &iv, &secret);
            assert_eq!(ciphertext.len(), len, "CTR mode should preserve length");

            let decrypted = decrypt_secret(&key(), &iv, &ciphertext);
            assert_eq!(decrypted.expose_secret(), &secret);
        }
    }

    #[test]
    fn test_known_keystream() {
        // EIP-2335 scrypt test vector with reduced cost: dk[0..16] and iv
        // decrypt the published ciphertext to the published secret
        let mut dk = [0u8; 32];
        dk[..16].copy_from_slice(&hex::decode("2974578f2b0969eb656541d63d8bf9ad").unwrap());
        let iv: [u8; 16] = hex::decode("264daa3f303d7259501c93d997d84fe6")
            .unwrap()
            .try_into()
            .unwrap();
        let ciphertext =
            hex::decode("f231aab75697116aed3d631d8e590946cab99199a17b7ad8817d4075eca0ce19")
                .unwrap();

        let plaintext = decrypt_secret(&DecryptionKey::new(dk), &iv, &ciphertext);
        assert_eq!(
            hex::encode(plaintext.expose_secret()),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }

    #[test]
    fn test_different_iv_different_ciphertext() {
        let secret = b"same-plaintext";

        let ciphertext1 = encrypt_secret(&key(), &[0x11; 16], secret);
        let ciphertext2 = encrypt_secret(&key(), &[0x22; 16], secret);

        assert_ne!(ciphertext1, ciphertext2);
    }

    #[test]
    fn test_cipher_module_serialization() {
        let module = CipherModule::new([0xEE; 16], vec![0xFF; 32]);

        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["function"], "aes-128-ctr");
        assert_eq!(json["params"]["iv"], hex::encode([0xEE; 16]));

        let parsed: CipherModule = serde_json::from_value(json).unwrap();
        assert_eq!(module, parsed);
    }

    #[test]
    fn test_cipher_module_rejects_bad_input() {
        let json = json!({"function": "aes-256-gcm", "params": {"iv": "00"}, "message": ""});
        assert!(serde_json::from_value::<CipherModule>(json).is_err());

        // 8-byte IV
        let json = json!({
            "function": "aes-128-ctr",
            "params": {"iv": "0011223344556677"},
            "message": ""
        });
        assert!(serde_json::from_value::<CipherModule>(json).is_err());

        // missing IV
        let json = json!({"function": "aes-128-ctr", "params": {}, "message": ""});
        assert!(serde_json::from_value::<CipherModule>(json).is_err());
    }

    #[test]
    fn test_generate_iv() {
        let iv1 = generate_iv();
        let iv2 = generate_iv();

        // IVs should be different (extremely high probability)
        assert_ne!(iv1, iv2);
    }
}
