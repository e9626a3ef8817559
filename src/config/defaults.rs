//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::webhook::DEFAULT_TOLERANCE_MS;

/// Default timestamp tolerance in milliseconds (5 minutes).
pub const TOLERANCE_MS: i64 = DEFAULT_TOLERANCE_MS;

/// Default path written by the `init` subcommand.
pub const CONFIG_FILE: &str = "usesend-webhooks.toml";
