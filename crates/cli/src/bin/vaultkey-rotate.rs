//! Re-encrypt an EIP-2335 keystore under a new password

use std::path::PathBuf;

use clap::Parser;
use vaultkey_cli::rotate::{self, KdfChoice, RotateOptions};
use vaultkey_cli::{exit_on_error, init_tracing, password_source, LogArgs};

/// Keystore password rotation
#[derive(Parser)]
#[command(name = "vaultkey-rotate")]
#[command(version)]
#[command(about = "Re-encrypt a keystore under a new password", long_about = None)]
struct Cli {
    /// Keystore file to read
    input: PathBuf,

    /// Where to write the re-encrypted keystore (must differ from input)
    output: PathBuf,

    /// Read the current password from this file instead of prompting
    #[arg(long, env = "VAULTKEY_OLD_PASSWORD_FILE")]
    old_password_file: Option<PathBuf>,

    /// Read the new password from this file instead of prompting twice
    #[arg(long, env = "VAULTKEY_NEW_PASSWORD_FILE")]
    new_password_file: Option<PathBuf>,

    /// KDF for the new keystore (default: keep the input's KDF and cost)
    #[arg(long, env = "VAULTKEY_KDF", value_enum)]
    kdf: Option<KdfChoice>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let options = RotateOptions {
        input: cli.input,
        output: cli.output,
        kdf: cli.kdf,
    };
    let mut old_passwords = password_source(cli.old_password_file.as_deref());
    let mut new_passwords = password_source(cli.new_password_file.as_deref());

    let result = rotate::execute(&options, old_passwords.as_mut(), new_passwords.as_mut());
    if result.is_ok() {
        println!("{}", rotate::success_message(&options.output));
    }

    exit_on_error(result, cli.log.trace);
}
