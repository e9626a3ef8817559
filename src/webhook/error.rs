//! Error types for webhook verification.

use std::fmt;

use thiserror::Error;

/// The closed set of reasons a webhook delivery can be rejected.
///
/// The string form ([`WebhookErrorCode::as_str`]) is stable and suitable
/// for returning to callers or matching in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookErrorCode {
    /// The signature header is absent.
    MissingSignature,
    /// The timestamp header is absent.
    MissingTimestamp,
    /// The signature header lacks a recognized version prefix.
    InvalidSignatureFormat,
    /// The timestamp header is not a base-10 integer.
    InvalidTimestamp,
    /// The timestamp falls outside the tolerance window.
    TimestampOutOfRange,
    /// The recomputed signature differs from the received one.
    SignatureMismatch,
    /// The body is not valid UTF-8.
    InvalidBody,
    /// The body is not a JSON object.
    ///
    /// Only produced when constructing an event.
    InvalidJson,
}

impl WebhookErrorCode {
    /// Returns the stable identifier for this code, e.g. `SIGNATURE_MISMATCH`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::MissingTimestamp => "MISSING_TIMESTAMP",
            Self::InvalidSignatureFormat => "INVALID_SIGNATURE_FORMAT",
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::TimestampOutOfRange => "TIMESTAMP_OUT_OF_RANGE",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidJson => "INVALID_JSON",
        }
    }
}

impl fmt::Display for WebhookErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a webhook delivery fails verification or parsing.
///
/// Carries a [`WebhookErrorCode`] and a human-readable message. Displays
/// as `[CODE] message`.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct WebhookVerificationError {
    code: WebhookErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl WebhookVerificationError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: WebhookErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub(crate) fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> WebhookErrorCode {
        self.code
    }

    /// Returns the human-readable message, without the code prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
