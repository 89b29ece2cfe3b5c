//! Rotator command: re-encrypt a keystore under a new password

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::ValueEnum;
use tracing::info;
use vaultkey_crypto::keystore::{KdfFunction, KdfParams};

use crate::files::{load_keystore, same_file, write_atomic};
use crate::prompt::{read_new_password, PasswordSource};

/// KDF choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KdfChoice {
    /// scrypt, N=262144 r=8 p=1
    Scrypt,
    /// PBKDF2-HMAC-SHA256, c=262144
    Pbkdf2,
}

impl From<KdfChoice> for KdfFunction {
    fn from(choice: KdfChoice) -> Self {
        match choice {
            KdfChoice::Scrypt => KdfFunction::Scrypt,
            KdfChoice::Pbkdf2 => KdfFunction::Pbkdf2,
        }
    }
}

/// What to rotate and where to put it
#[derive(Debug, Clone)]
pub struct RotateOptions {
    /// Keystore to read
    pub input: PathBuf,
    /// Where to write the re-encrypted keystore
    pub output: PathBuf,
    /// Switch to this KDF with standard cost; `None` keeps the input's
    pub kdf: Option<KdfChoice>,
}

/// Re-encrypt `options.input` and write the result to `options.output`.
///
/// Nothing is written unless every step succeeds.
pub fn execute(
    options: &RotateOptions,
    old_passwords: &mut dyn PasswordSource,
    new_passwords: &mut dyn PasswordSource,
) -> Result<()> {
    if same_file(&options.input, &options.output) {
        bail!("Output path must differ from input path");
    }

    let keystore = load_keystore(&options.input)?;

    let old_password = old_passwords.read_password("Current password: ")?;
    let new_password = read_new_password(new_passwords)?;

    let rotated = match options.kdf {
        Some(choice) => keystore.rotate_with(
            &old_password,
            &new_password,
            KdfParams::standard(choice.into()),
        )?,
        None => keystore.rotate(&old_password, &new_password)?,
    };

    let json = rotated.to_json_pretty()?;
    write_atomic(&options.output, json.as_bytes())?;

    info!(
        uuid = rotated.uuid(),
        kdf = %rotated.kdf_function(),
        output = %options.output.display(),
        "wrote rotated keystore"
    );
    Ok(())
}

/// Report line printed by the binary on success
pub fn success_message(output: &Path) -> String {
    format!("Re-encrypted keystore written to {}", output.display())
}
