//! EIP-2335 EncryptedKeystore implementation
//!
//! This module provides the envelope struct that combines the KDF, cipher and
//! checksum modules, plus the two workflows built on them: decrypting the
//! stored secret and re-encrypting it under a new password.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::checksum::{ChecksumModule, CHECKSUM_FUNCTION};
use super::cipher::{CipherModule, CIPHER_FUNCTION};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{KdfFunction, KdfModule, KdfParams};
use super::password::normalize_new_password;
use crate::secure::{IntoSecret, SecretBytes, SecretString};

/// Version number for EIP-2335 keystores
pub const KEYSTORE_VERSION: u32 = 4;

/// EIP-2335 compatible encrypted keystore
///
/// Fields the format does not define are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedKeystore {
    /// Crypto parameters (KDF + cipher + checksum)
    pub crypto: CryptoModule,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public key label as hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,
    /// Derivation path label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Unique identifier
    pub uuid: String,
    /// Schema version
    pub version: u32,
    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Combined crypto parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoModule {
    /// Key derivation function parameters
    pub kdf: KdfModule,
    /// Checksum for integrity verification
    pub checksum: ChecksumModule,
    /// Cipher parameters and encrypted data
    pub cipher: CipherModule,
}

impl CryptoModule {
    /// Encrypt `secret` under `password` with the given KDF params and a
    /// fresh IV.
    pub fn encrypt(
        secret: &[u8],
        password: &SecretString,
        params: KdfParams,
    ) -> KeystoreResult<Self> {
        let kdf = KdfModule::new(params);
        let key = kdf.derive_key(password)?;

        let cipher = CipherModule::encrypt(&key, secret);
        let checksum = ChecksumModule::compute(&key, cipher.ciphertext());

        Ok(Self {
            kdf,
            checksum,
            cipher,
        })
    }
}

impl EncryptedKeystore {
    /// Parse an envelope from JSON text.
    ///
    /// The function tags of the three crypto modules are checked before
    /// typed decoding, so a missing or unknown tag gets its own error.
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse an envelope from an already-decoded JSON value
    pub fn from_value(value: Value) -> KeystoreResult<Self> {
        let kdf = function_tag(&value, "/crypto/kdf/function", "crypto.kdf.function")?;
        kdf.parse::<KdfFunction>()?;

        let checksum =
            function_tag(&value, "/crypto/checksum/function", "crypto.checksum.function")?;
        if checksum != CHECKSUM_FUNCTION {
            return Err(KeystoreError::UnsupportedChecksum(checksum.to_string()));
        }

        let cipher = function_tag(&value, "/crypto/cipher/function", "crypto.cipher.function")?;
        if cipher != CIPHER_FUNCTION {
            return Err(KeystoreError::UnsupportedCipher(cipher.to_string()));
        }

        let keystore: Self = serde_json::from_value(value)?;
        keystore.validate()?;
        Ok(keystore)
    }

    /// Check the envelope-level fields
    pub fn validate(&self) -> KeystoreResult<()> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version));
        }
        Uuid::parse_str(&self.uuid).map_err(|e| KeystoreError::InvalidUuid(e.to_string()))?;
        Ok(())
    }

    /// Decrypt the keystore and return the secret
    ///
    /// The checksum is verified before decryption; a mismatch is reported as
    /// `WrongPassword`.
    pub fn decrypt(&self, password: &SecretString) -> KeystoreResult<SecretBytes> {
        let key = self.crypto.kdf.derive_key(password)?;
        debug!(uuid = %self.uuid, kdf = %self.crypto.kdf.function(), "derived decryption key");

        if !self.crypto.checksum.verify(&key, self.crypto.cipher.ciphertext()) {
            return Err(KeystoreError::WrongPassword);
        }
        debug!(uuid = %self.uuid, "checksum verified");

        Ok(self.crypto.cipher.decrypt(&key))
    }

    /// Re-encrypt under `new_password`, keeping the KDF function and cost
    /// with a fresh salt and IV.
    pub fn rotate(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> KeystoreResult<Self> {
        let params = self.crypto.kdf.params.with_fresh_salt();
        self.rotate_with(old_password, new_password, params)
    }

    /// Re-encrypt under `new_password` with explicit KDF params.
    ///
    /// Only `crypto` changes; every other field is carried over.
    pub fn rotate_with(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
        params: KdfParams,
    ) -> KeystoreResult<Self> {
        // Fail on an unusable new password before paying for the old KDF
        normalize_new_password(new_password)?;
        params.validate()?;

        let secret = self.decrypt(old_password)?;
        let crypto = CryptoModule::encrypt(secret.expose_secret(), new_password, params)?;

        debug!(uuid = %self.uuid, kdf = %crypto.kdf.function(), "re-encrypted keystore");

        Ok(Self {
            crypto,
            ..self.clone()
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> KeystoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the UUID
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Get the public key label if present
    pub fn pubkey(&self) -> Option<&str> {
        self.pubkey.as_deref()
    }

    /// Get the description if present
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the derivation path label if present
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The KDF function in use
    pub fn kdf_function(&self) -> KdfFunction {
        self.crypto.kdf.function()
    }
}

/// String at `pointer`, or `MissingField(name)`
fn function_tag<'a>(
    value: &'a Value,
    pointer: &str,
    name: &'static str,
) -> KeystoreResult<&'a str> {
    match value.pointer(pointer) {
        None | Some(Value::Null) => Err(KeystoreError::MissingField(name)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(KeystoreError::InvalidKdfParams(format!(
            "{} must be a string, got {}",
            name, other
        ))),
    }
}

/// Builder for creating EncryptedKeystore instances
#[derive(Default)]
pub struct KeystoreBuilder {
    secret: Option<SecretBytes>,
    password: Option<SecretString>,
    kdf: Option<KdfParams>,
    pubkey: Option<String>,
    description: Option<String>,
    path: Option<String>,
    uuid: Option<String>,
}

impl KeystoreBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the secret to encrypt
    pub fn secret(mut self, secret: &[u8]) -> Self {
        self.secret = Some(secret.to_vec().into_secret());
        self
    }

    /// Set the password for key derivation
    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Set KDF parameters (default: standard scrypt with a fresh salt)
    pub fn kdf(mut self, params: KdfParams) -> Self {
        self.kdf = Some(params);
        self
    }

    /// Set the public key label (hex encoded)
    pub fn pubkey(mut self, pubkey: &str) -> Self {
        self.pubkey = Some(pubkey.to_string());
        self
    }

    /// Set an optional description
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the derivation path label
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set a custom UUID (normally auto-generated)
    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    /// Build the keystore
    pub fn build(self) -> KeystoreResult<EncryptedKeystore> {
        let secret = self.secret.ok_or(KeystoreError::MissingField("secret"))?;
        let password = self.password.ok_or(KeystoreError::EmptyPassword)?;
        normalize_new_password(&password)?;
        let params = self.kdf.unwrap_or_else(KdfParams::scrypt);

        let crypto = CryptoModule::encrypt(secret.expose_secret(), &password, params)?;

        let keystore = EncryptedKeystore {
            crypto,
            description: self.description,
            pubkey: self.pubkey,
            path: self.path,
            uuid: self.uuid.unwrap_or_else(|| Uuid::new_v4().to_string()),
            version: KEYSTORE_VERSION,
            extra: Map::new(),
        };
        keystore.validate()?;

        Ok(keystore)
    }
}
