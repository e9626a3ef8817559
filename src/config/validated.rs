//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use crate::webhook::Webhooks;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
pub struct ValidatedConfig {
    /// Webhook signing secret (required)
    pub secret: String,

    /// Allowed timestamp drift in milliseconds
    pub tolerance_ms: i64,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tolerance = if self.tolerance_ms < 0 {
            "disabled".to_string()
        } else {
            format!("{}ms", self.tolerance_ms)
        };

        write!(
            f,
            "Config {{ secret: <redacted>, tolerance: {tolerance}, verbose: {} }}",
            self.verbose
        )
    }
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("secret", &"<redacted>")
            .field("tolerance_ms", &self.tolerance_ms)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is missing or empty in both sources.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let secret = Self::resolve_secret(cli, toml)?;

        let tolerance_ms = cli
            .tolerance
            .or_else(|| toml.and_then(|t| t.webhook.tolerance_ms))
            .unwrap_or(defaults::TOLERANCE_MS);

        Ok(Self {
            secret,
            tolerance_ms,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds a verifier from this configuration.
    #[must_use]
    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.secret.clone()).with_tolerance_ms(self.tolerance_ms)
    }

    fn resolve_secret(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // CLI takes precedence
        let secret = cli
            .secret
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.secret.as_deref()))
            .filter(|s| !s.is_empty());

        secret.map(str::to_string).ok_or_else(|| {
            ConfigError::missing(
                field::SECRET,
                "Use --secret or set webhook.secret in config file",
            )
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parses a `Key: Value` or `Key=Value` header line.
///
/// The line is split at whichever separator comes first, so signature
/// values such as `v1=...` survive the `Key: Value` form.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHeader`] if there is no separator or the
/// name is empty.
pub fn parse_header_line(s: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::InvalidHeader {
        value: s.to_string(),
    };

    let split_at = s.find([':', '=']).ok_or_else(invalid)?;
    let name = s[..split_at].trim();
    let value = s[split_at + 1..].trim();

    if name.is_empty() {
        return Err(invalid());
    }
    Ok((name.to_string(), value.to_string()))
}
