//! Decrypt an EIP-2335 keystore and print the derived Ethereum account

use std::io;
use std::path::PathBuf;

use clap::Parser;
use vaultkey_cli::{exit_on_error, init_tracing, password_source, view, LogArgs};
use vaultkey_crypto::hdkey::{DerivationPath, DEFAULT_DERIVATION_PATH};

/// Keystore viewer
#[derive(Parser)]
#[command(name = "vaultkey-view")]
#[command(version)]
#[command(
    about = "Decrypt a keystore and show the account at a derivation path",
    long_about = None
)]
struct Cli {
    /// Keystore file to read
    input: PathBuf,

    /// Read the password from this file instead of prompting
    #[arg(long, env = "VAULTKEY_PASSWORD_FILE")]
    password_file: Option<PathBuf>,

    /// BIP-32 derivation path
    #[arg(long, env = "VAULTKEY_PATH", default_value = DEFAULT_DERIVATION_PATH)]
    path: DerivationPath,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let mut passwords = password_source(cli.password_file.as_deref());
    let result = view::execute(
        &cli.input,
        &cli.path,
        passwords.as_mut(),
        &mut io::stdout().lock(),
    );

    exit_on_error(result, cli.log.trace);
}
