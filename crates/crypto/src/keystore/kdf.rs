//! Key Derivation Function (KDF) implementation
//!
//! Implements the two EIP-2335 KDFs: scrypt (memory-hard) and PBKDF2 with
//! HMAC-SHA256 (iterated). Standard parameters are N=262144 (2^18), r=8, p=1
//! for scrypt and c=262144 for PBKDF2.
//!
//! Derivation is deliberately slow and is never retried here; a wrong password
//! is reported once and the caller decides whether to ask again.

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::error::{KeystoreError, KeystoreResult};
use super::password::normalize_password;
use crate::secure::{DecryptionKey, SecretString, DECRYPTION_KEY_SIZE};

/// Standard scrypt parameters following EIP-2335 specification
pub const SCRYPT_N: u32 = 262144; // 2^18 - EIP-2335 standard
pub const SCRYPT_R: u32 = 8; // block size
pub const SCRYPT_P: u32 = 1; // parallelization

/// Largest scrypt working set accepted from a keystore file (2 GiB)
pub const SCRYPT_MAX_MEMORY: u64 = 2 << 30;

/// Standard PBKDF2 iteration count following EIP-2335 specification
pub const PBKDF2_C: u32 = 262144;

/// The only PBKDF2 pseudo-random function accepted
pub const PBKDF2_PRF: &str = "hmac-sha256";

/// Derived key length written into new keystores
pub const DKLEN: u32 = DECRYPTION_KEY_SIZE as u32;

/// Largest derived key length accepted from a keystore
pub const MAX_DKLEN: u32 = 64;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// KDF function identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfFunction {
    /// `"scrypt"`
    Scrypt,
    /// `"pbkdf2"`
    Pbkdf2,
}

impl KdfFunction {
    /// Identifier used in the keystore JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            KdfFunction::Scrypt => "scrypt",
            KdfFunction::Pbkdf2 => "pbkdf2",
        }
    }
}

impl fmt::Display for KdfFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KdfFunction {
    type Err = KeystoreError;

    fn from_str(s: &str) -> KeystoreResult<Self> {
        match s {
            "scrypt" => Ok(KdfFunction::Scrypt),
            "pbkdf2" => Ok(KdfFunction::Pbkdf2),
            other => Err(KeystoreError::UnsupportedKdf(other.to_string())),
        }
    }
}

/// scrypt parameters (EIP-2335 standard)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScryptParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// CPU/memory cost parameter (must be power of 2)
    pub n: u32,
    /// Block size parameter
    pub r: u32,
    /// Parallelization parameter
    pub p: u32,
    /// Salt bytes (hex in JSON)
    #[serde(with = "super::hex_bytes")]
    pub salt: Vec<u8>,
}

/// PBKDF2 parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pbkdf2Params {
    /// Derived key length in bytes
    pub dklen: u32,
    /// Iteration count
    pub c: u32,
    /// Pseudo-random function, must be `hmac-sha256`
    pub prf: String,
    /// Salt bytes (hex in JSON)
    #[serde(with = "super::hex_bytes")]
    pub salt: Vec<u8>,
}

/// KDF parameters, one variant per supported function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdfParams {
    /// Memory-hard scrypt
    Scrypt(ScryptParams),
    /// Iterated HMAC-SHA256
    Pbkdf2(Pbkdf2Params),
}

impl KdfParams {
    /// Standard EIP-2335 scrypt parameters with a fresh random salt
    pub fn scrypt() -> Self {
        Self::scrypt_with_cost(SCRYPT_N, SCRYPT_R, SCRYPT_P)
    }

    /// scrypt with custom cost and a fresh random salt
    pub fn scrypt_with_cost(n: u32, r: u32, p: u32) -> Self {
        KdfParams::Scrypt(ScryptParams {
            dklen: DKLEN,
            n,
            r,
            p,
            salt: generate_salt(),
        })
    }

    /// Standard EIP-2335 PBKDF2 parameters with a fresh random salt
    pub fn pbkdf2() -> Self {
        Self::pbkdf2_with_cost(PBKDF2_C)
    }

    /// PBKDF2-HMAC-SHA256 with a custom iteration count and a fresh random salt
    pub fn pbkdf2_with_cost(c: u32) -> Self {
        KdfParams::Pbkdf2(Pbkdf2Params {
            dklen: DKLEN,
            c,
            prf: PBKDF2_PRF.to_string(),
            salt: generate_salt(),
        })
    }

    /// Standard parameters for `function`, fresh salt
    pub fn standard(function: KdfFunction) -> Self {
        match function {
            KdfFunction::Scrypt => Self::scrypt(),
            KdfFunction::Pbkdf2 => Self::pbkdf2(),
        }
    }

    /// Same function and cost, fresh salt, `dklen` reset to 32
    pub fn with_fresh_salt(&self) -> Self {
        match self {
            KdfParams::Scrypt(p) => Self::scrypt_with_cost(p.n, p.r, p.p),
            KdfParams::Pbkdf2(p) => Self::pbkdf2_with_cost(p.c),
        }
    }

    /// The function tag of these params
    pub fn function(&self) -> KdfFunction {
        match self {
            KdfParams::Scrypt(_) => KdfFunction::Scrypt,
            KdfParams::Pbkdf2(_) => KdfFunction::Pbkdf2,
        }
    }

    /// The salt
    pub fn salt(&self) -> &[u8] {
        match self {
            KdfParams::Scrypt(p) => &p.salt,
            KdfParams::Pbkdf2(p) => &p.salt,
        }
    }

    /// Validate the parameters
    pub fn validate(&self) -> KeystoreResult<()> {
        match self {
            KdfParams::Scrypt(ScryptParams { dklen, n, r, p, .. }) => {
                validate_dklen(*dklen)?;
                // n must be a power of 2 greater than 1
                if *n < 2 || !n.is_power_of_two() {
                    return Err(KeystoreError::InvalidKdfParams(
                        "n must be a power of 2 greater than 1".to_string(),
                    ));
                }
                if *r == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "r must be positive".to_string(),
                    ));
                }
                if *p == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "p must be positive".to_string(),
                    ));
                }
                validate_scrypt_memory(*n, *r, *p)
            }
            KdfParams::Pbkdf2(Pbkdf2Params { dklen, c, prf, .. }) => {
                validate_dklen(*dklen)?;
                if *c == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "c must be positive".to_string(),
                    ));
                }
                if prf != PBKDF2_PRF {
                    return Err(KeystoreError::UnsupportedPrf(prf.clone()));
                }
                Ok(())
            }
        }
    }

    /// JSON `params` object in EIP-2335 layout
    fn to_json(&self) -> Value {
        match self {
            KdfParams::Scrypt(p) => json!({
                "dklen": p.dklen,
                "n": p.n,
                "p": p.p,
                "r": p.r,
                "salt": hex::encode(&p.salt),
            }),
            KdfParams::Pbkdf2(p) => json!({
                "c": p.c,
                "dklen": p.dklen,
                "prf": p.prf,
                "salt": hex::encode(&p.salt),
            }),
        }
    }
}

/// `128 * r * n` for the scratch array and `128 * r * p` for the blocks
fn validate_scrypt_memory(n: u32, r: u32, p: u32) -> KeystoreResult<()> {
    let block = 128 * u64::from(r);
    let within_cap = |count: u32| {
        block
            .checked_mul(u64::from(count))
            .is_some_and(|bytes| bytes <= SCRYPT_MAX_MEMORY)
    };

    if !within_cap(n) || !within_cap(p) {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "scrypt n={} r={} p={} needs more than {} bytes",
            n, r, p, SCRYPT_MAX_MEMORY
        )));
    }
    Ok(())
}

fn validate_dklen(dklen: u32) -> KeystoreResult<()> {
    if !(DKLEN..=MAX_DKLEN).contains(&dklen) {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "dklen must be between {} and {}",
            DKLEN, MAX_DKLEN
        )));
    }
    Ok(())
}

/// Derive the 32-byte decryption key from normalised password bytes.
///
/// Parameters are validated first; the same password and params always yield
/// the same key.
pub fn derive(password: &[u8], params: &KdfParams) -> KeystoreResult<DecryptionKey> {
    params.validate()?;

    let output = match params {
        KdfParams::Scrypt(p) => {
            debug!(function = "scrypt", n = p.n, r = p.r, p = p.p, "deriving decryption key");
            scrypt_derive_key(password, &p.salt, p.n, p.r, p.p, p.dklen as usize)?
        }
        KdfParams::Pbkdf2(p) => {
            debug!(function = "pbkdf2", c = p.c, "deriving decryption key");
            pbkdf2_derive_key(password, &p.salt, p.c, p.dklen as usize)
        }
    };

    DecryptionKey::from_kdf_output(&output)
        .ok_or_else(|| KeystoreError::InvalidKdfParams("dklen must be at least 32".to_string()))
}

/// Derive a key using scrypt KDF
///
/// # Arguments
///
/// * `password` - Normalised password bytes
/// * `salt` - Salt bytes
/// * `n` - CPU/memory cost parameter (must be power of 2)
/// * `r` - Block size parameter
/// * `p` - Parallelization parameter
/// * `dklen` - Desired key length in bytes
pub fn scrypt_derive_key(
    password: &[u8],
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    dklen: usize,
) -> KeystoreResult<Zeroizing<Vec<u8>>> {
    let log_n = n.trailing_zeros() as u8;

    let params = scrypt::Params::new(log_n, r, p, dklen)
        .map_err(|e| KeystoreError::InvalidKdfParams(e.to_string()))?;

    let mut output = Zeroizing::new(vec![0u8; dklen]);
    scrypt::scrypt(password, salt, &params, &mut output)
        .map_err(|e| KeystoreError::KdfError(e.to_string()))?;

    Ok(output)
}

/// Derive a key using PBKDF2-HMAC-SHA256
pub fn pbkdf2_derive_key(password: &[u8], salt: &[u8], c: u32, dklen: usize) -> Zeroizing<Vec<u8>> {
    let mut output = Zeroizing::new(vec![0u8; dklen]);
    pbkdf2_hmac::<Sha256>(password, salt, c, &mut output);
    output
}

/// Generate a random salt
pub fn generate_salt() -> Vec<u8> {
    use rand::RngCore;
    let mut salt = vec![0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// KDF module for EIP-2335 keystore
///
/// Parsed from `{"function", "params", "message"}` with the params checked
/// against the function tag, so a `KdfModule` always holds usable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKdfModule", into = "RawKdfModule")]
pub struct KdfModule {
    /// KDF parameters, tagged by function
    pub params: KdfParams,
    /// Empty message field (required by EIP-2335 schema)
    pub message: String,
}

impl KdfModule {
    /// Wrap params with an empty message
    pub fn new(params: KdfParams) -> Self {
        Self {
            params,
            message: String::new(),
        }
    }

    /// The function tag
    pub fn function(&self) -> KdfFunction {
        self.params.function()
    }

    /// Normalise `password` and derive the decryption key
    pub fn derive_key(&self, password: &SecretString) -> KeystoreResult<DecryptionKey> {
        let password = normalize_password(password);
        derive(password.expose_secret(), &self.params)
    }
}

/// Wire shape of the `kdf` object
#[derive(Serialize, Deserialize)]
struct RawKdfModule {
    function: String,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    message: String,
}

impl TryFrom<RawKdfModule> for KdfModule {
    type Error = KeystoreError;

    fn try_from(raw: RawKdfModule) -> KeystoreResult<Self> {
        let invalid = |e: serde_json::Error| KeystoreError::InvalidKdfParams(e.to_string());

        let params = match raw.function.parse::<KdfFunction>()? {
            KdfFunction::Scrypt => {
                KdfParams::Scrypt(serde_json::from_value(raw.params).map_err(invalid)?)
            }
            KdfFunction::Pbkdf2 => {
                KdfParams::Pbkdf2(serde_json::from_value(raw.params).map_err(invalid)?)
            }
        };
        params.validate()?;

        Ok(Self {
            params,
            message: raw.message,
        })
    }
}

impl From<KdfModule> for RawKdfModule {
    fn from(module: KdfModule) -> Self {
        Self {
            function: module.function().as_str().to_string(),
            params: module.params.to_json(),
            message: module.message,
        }
    }
}
