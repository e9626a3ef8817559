//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use usesend_webhooks::config::{ConfigError, field};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable files, missing secret.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Verification failure (exit code 2) - the delivery was rejected.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn verification_failure() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::SECRET => {
            eprintln!("\nRun 'usesend-webhooks init' to generate a configuration template.");
        }
        ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'usesend-webhooks init' to see the expected configuration layout.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so that `sign` output can be piped.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
