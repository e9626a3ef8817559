//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// usesend-webhooks: sign and verify UseSend webhook deliveries
///
/// Verifies captured deliveries against a signing secret, or produces
/// correctly signed headers for testing a receiver.
#[derive(Debug, Parser)]
#[command(name = "usesend-webhooks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Webhook signing secret
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Allowed timestamp drift in milliseconds (negative disables the check)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub tolerance: Option<i64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for usesend-webhooks
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Print the headers a delivery of the given body would carry
    Sign {
        /// File containing the raw request body
        #[arg(long)]
        body: PathBuf,

        /// Timestamp in milliseconds since the epoch (default: now)
        #[arg(long)]
        timestamp: Option<i64>,

        /// Event type for the X-UseSend-Event header
        #[arg(long)]
        event: Option<String>,

        /// Delivery identifier for the X-UseSend-Call header
        #[arg(long)]
        call: Option<String>,
    },

    /// Verify a captured delivery and print its event type
    Verify {
        /// File containing the raw request body
        #[arg(long)]
        body: PathBuf,

        /// Request headers in 'Key: Value' or 'Key=Value' format (can be specified multiple times)
        #[arg(long = "header", value_name = "K: V")]
        headers: Vec<String>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
