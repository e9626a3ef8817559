//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file named on the command line.
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The webhook signing secret field.
    pub const SECRET: &str = "secret";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
