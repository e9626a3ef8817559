//! Subcommand execution.
//!
//! This module reads delivery bodies from disk and drives the signer and
//! verifier for the `sign` and `verify` subcommands.

use std::path::Path;

use thiserror::Error;

use usesend_webhooks::config::{ConfigError, ValidatedConfig, parse_header_line};
use usesend_webhooks::time::Clock;
use usesend_webhooks::webhook::{
    SignedPayload, VerifyOptions, WebhookEvent, WebhookSigner, WebhookVerificationError, Webhooks,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for subcommand failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Input could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The delivery was rejected.
    #[error(transparent)]
    Verification(#[from] WebhookVerificationError),

    /// The body to sign is not UTF-8.
    #[error("Body file '{}' is not valid UTF-8", path.display())]
    NonUtf8Body {
        /// Path to the body file
        path: std::path::PathBuf,
    },
}

/// Options for the `sign` subcommand.
#[derive(Debug, Default)]
pub struct SignRequest<'a> {
    /// Fixed timestamp; the current time when unset
    pub timestamp_ms: Option<i64>,
    pub event_type: Option<&'a str>,
    pub call_id: Option<&'a str>,
}

/// Signs the body stored at `path` and returns the header lines to print.
pub fn sign(
    config: &ValidatedConfig,
    path: &Path,
    request: &SignRequest<'_>,
) -> Result<String, RunError> {
    let bytes = read_body(path)?;
    let body = String::from_utf8(bytes).map_err(|_| RunError::NonUtf8Body {
        path: path.to_path_buf(),
    })?;

    let signer = WebhookSigner::new(config.secret.clone());
    let signed = sign_body(&signer, &body, request);
    tracing::debug!(timestamp = %signed.timestamp, "Signed delivery body");

    Ok(format_headers(&signed))
}

/// Verifies the delivery stored at `path` against the given header lines.
pub fn verify(
    config: &ValidatedConfig,
    path: &Path,
    header_lines: &[String],
) -> Result<WebhookEvent, RunError> {
    let body = read_body(path)?;
    verify_body(&config.webhooks(), &body, header_lines)
}

fn sign_body<C: Clock>(
    signer: &WebhookSigner<C>,
    body: &str,
    request: &SignRequest<'_>,
) -> SignedPayload {
    let mut signed = match request.timestamp_ms {
        Some(ts) => signer.sign_at(ts, body),
        None => signer.sign(body),
    };
    if let Some(event_type) = request.event_type {
        signed = signed.with_event_type(event_type);
    }
    if let Some(call_id) = request.call_id {
        signed = signed.with_call_id(call_id);
    }
    signed
}

fn verify_body<C: Clock>(
    webhooks: &Webhooks<C>,
    body: &[u8],
    header_lines: &[String],
) -> Result<WebhookEvent, RunError> {
    let headers = header_lines
        .iter()
        .map(|line| parse_header_line(line))
        .collect::<Result<Vec<_>, _>>()?;

    let event = webhooks.construct_event(body, &headers, VerifyOptions::new())?;
    Ok(event)
}

/// Formats signed headers as `Name: value` lines.
fn format_headers(signed: &SignedPayload) -> String {
    signed
        .pairs()
        .iter()
        .map(|(name, value)| format!("{name}: {value}\n"))
        .collect()
}

fn read_body(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
