//! Password sources
//!
//! Commands ask a [`PasswordSource`] for each password they need. The terminal
//! source prompts without echo; the file source reads a password file once per
//! request. Tests substitute a scripted source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use secrecy::ExposeSecret;
use tracing::warn;
use vaultkey_crypto::{IntoSecret, SecretString};
use zeroize::Zeroizing;

/// New passwords shorter than this are accepted with a warning
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Somewhere a password can be obtained from
pub trait PasswordSource {
    /// Obtain one password. `prompt` is shown to interactive users.
    fn read_password(&mut self, prompt: &str) -> Result<SecretString>;

    /// Whether a new password read from here should be asked for twice
    fn needs_confirmation(&self) -> bool {
        true
    }
}

/// Prompts on the controlling terminal with echo disabled
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl PasswordSource for TerminalPrompt {
    fn read_password(&mut self, prompt: &str) -> Result<SecretString> {
        let password = rpassword::prompt_password(prompt).context("Failed to read password")?;
        Ok(password.into_secret())
    }
}

/// Reads the password from a file
#[derive(Debug, Clone)]
pub struct PasswordFile {
    path: PathBuf,
}

impl PasswordFile {
    /// Source backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PasswordSource for PasswordFile {
    fn read_password(&mut self, _prompt: &str) -> Result<SecretString> {
        read_password_from_file(&self.path)
    }

    fn needs_confirmation(&self) -> bool {
        false
    }
}

/// Pick the file source when a path is given, the terminal otherwise
pub fn password_source(file: Option<&Path>) -> Box<dyn PasswordSource> {
    match file {
        Some(path) => Box::new(PasswordFile::new(path)),
        None => Box::new(TerminalPrompt),
    }
}

/// Read a password file, dropping one trailing line ending
pub fn read_password_from_file(path: &Path) -> Result<SecretString> {
    let content = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read password file: {}", path.display()))?,
    );

    let password = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(&content);

    if password.is_empty() {
        return Err(anyhow!("Password file is empty: {}", path.display()));
    }

    Ok(password.to_string().into_secret())
}

/// Obtain a new password, asking twice when the source is interactive.
///
/// Fails on mismatch or an empty password; warns on a short one.
pub fn read_new_password(source: &mut dyn PasswordSource) -> Result<SecretString> {
    let password = source.read_password("New password: ")?;

    if source.needs_confirmation() {
        let confirmation = source.read_password("Confirm new password: ")?;
        if password.expose_secret() != confirmation.expose_secret() {
            bail!("Passwords do not match");
        }
    }

    let length = password.expose_secret().chars().count();
    if length == 0 {
        bail!("New password must not be empty");
    }
    if length < MIN_PASSWORD_LENGTH {
        warn!(
            length,
            minimum = MIN_PASSWORD_LENGTH,
            "new password is shorter than recommended"
        );
    }

    Ok(password)
}
