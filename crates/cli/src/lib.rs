//! vaultkey command-line tools
//!
//! Two binaries share this library:
//! - `vaultkey-view` decrypts a keystore and prints the account derived at a
//!   path (default `m/44'/60'/0'/0/0`)
//! - `vaultkey-rotate` re-encrypts a keystore under a new password

pub mod files;
pub mod logging;
pub mod prompt;
pub mod rotate;
pub mod view;

pub use logging::{init_tracing, LogArgs, LogFormat};
pub use prompt::{password_source, PasswordFile, PasswordSource, TerminalPrompt};

/// Print a command failure and exit with status 1.
///
/// `trace` shows the whole error chain instead of the top-level message.
pub fn exit_on_error(result: anyhow::Result<()>, trace: bool) {
    if let Err(e) = &result {
        if trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
