//! Viewer command: decrypt a keystore and show the account at one path

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vaultkey_crypto::hdkey::{derive_account, DerivationPath, DerivedAccount};
use vaultkey_crypto::ExposeSecret;

use crate::files::load_keystore;
use crate::prompt::PasswordSource;

/// Decrypt `input`, derive the account at `path` and print it to `out`.
pub fn execute(
    input: &Path,
    path: &DerivationPath,
    passwords: &mut dyn PasswordSource,
    out: &mut dyn Write,
) -> Result<()> {
    let keystore = load_keystore(input)?;
    let password = passwords.read_password("Keystore password: ")?;

    let seed = keystore.decrypt(&password)?;
    let account = derive_account(seed.expose_secret(), path)
        .with_context(|| format!("Failed to derive key at {}", path))?;
    drop(seed);

    info!(uuid = keystore.uuid(), path = %path, "derived account");

    let label = keystore
        .pubkey()
        .filter(|pubkey| !pubkey.is_empty())
        .unwrap_or("(none)");
    write_account(out, label, &account)?;
    Ok(())
}

/// Print the account report
fn write_account(out: &mut dyn Write, label: &str, account: &DerivedAccount) -> Result<()> {
    writeln!(out, "Keystore pubkey: {}", label)?;
    writeln!(out, "Path:            {}", account.path)?;
    writeln!(out, "Private key:     0x{}", account.private_key.to_hex().as_str())?;
    writeln!(
        out,
        "Public key:      0x{}",
        hex::encode(account.public_key.to_bytes())
    )?;
    writeln!(out, "Address:         {}", account.checksum_address())?;
    out.flush()?;
    Ok(())
}
