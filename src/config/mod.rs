//! Configuration layer for the `usesend-webhooks` tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The signing secret has no default and must come from `--secret` or
//! `webhook.secret`. The tolerance defaults to 5 minutes; a negative value
//! disables the timestamp check.
//!
//! Environment variables are not consulted, apart from `RUST_LOG` for
//! log filtering.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, parse_header_line, write_default_config};
