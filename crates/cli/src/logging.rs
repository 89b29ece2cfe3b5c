//! Tracing setup shared by the binaries

use clap::{Args, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

/// Logging and error-reporting flags common to every binary
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, env = "VAULTKEY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The logging format (json|plain)
    #[arg(long, env = "VAULTKEY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print out the full error chain on failure
    #[arg(long, default_value = "false")]
    pub trace: bool,
}

/// Parse a level name, falling back to `warn`
pub fn parse_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `--log-level`.
///
/// Events go to stderr; stdout is reserved for command output.
pub fn init_tracing(args: &LogArgs) {
    let level = parse_level(&args.log_level);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Plain => subscriber.init(),
    }
}
