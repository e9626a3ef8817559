//! usesend-webhooks: UseSend webhook signing and verification
//!
//! Entry point for the usesend-webhooks command-line tool.

use std::process::ExitCode;

use usesend_webhooks::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::{RunError, SignRequest};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    match &cli.command {
        Command::Init { .. } => exit_code::SUCCESS,
        Command::Sign {
            body,
            timestamp,
            event,
            call,
        } => {
            let request = SignRequest {
                timestamp_ms: *timestamp,
                event_type: event.as_deref(),
                call_id: call.as_deref(),
            };
            match run::sign(&config, body, &request) {
                Ok(output) => {
                    print!("{output}");
                    exit_code::SUCCESS
                }
                Err(e) => report(&e),
            }
        }
        Command::Verify { body, headers } => match run::verify(&config, body, headers) {
            Ok(event) => {
                println!("{}", event.type_tag().unwrap_or("<untyped>"));
                exit_code::SUCCESS
            }
            Err(e) => report(&e),
        },
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Prints a subcommand failure and maps it to an exit code.
fn report(error: &RunError) -> ExitCode {
    eprintln!("{error}");
    match error {
        RunError::Verification(_) => exit_code::verification_failure(),
        RunError::Config(_) | RunError::NonUtf8Body { .. } => exit_code::CONFIG_ERROR,
    }
}
