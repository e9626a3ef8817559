//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// Webhook verification section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Signing secret shared with the platform
    pub secret: Option<String>,

    /// Allowed timestamp drift in milliseconds (negative disables the check)
    pub tolerance_ms: Option<i64>,
}

impl std::fmt::Debug for WebhookSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSection")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("tolerance_ms", &self.tolerance_ms)
            .finish()
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# usesend-webhooks Configuration File

[webhook]
# Signing secret from the webhook settings page (required)
# Can be overridden by the --secret CLI flag
# secret = "whsec_..."

# Allowed drift between the delivery timestamp and the local clock,
# in milliseconds (default: 300000 = 5 minutes).
# A negative value disables the check; 0 requires an exact match.
# tolerance_ms = 300000
"#
    .to_string()
}
