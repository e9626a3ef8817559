//! Signature verification and event construction.

use std::fmt;
use std::num::IntErrorKind;

use crate::time::{Clock, SystemClock};

use super::signature::{DEFAULT_TOLERANCE_MS, SIGNATURE_PREFIX, compute_signature, signatures_match};
use super::{
    WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER, WebhookBody, WebhookErrorCode,
    WebhookEvent, WebhookHeaders, WebhookVerificationError,
};

/// Per-call overrides for verification.
///
/// Both fields default to the verifier's own settings.
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::VerifyOptions;
///
/// let options = VerifyOptions::new()
///     .with_secret("whsec_rotated")
///     .with_tolerance_ms(60_000);
/// assert_eq!(options.tolerance_ms, Some(60_000));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions<'a> {
    /// Secret to use instead of the verifier's configured one.
    pub secret: Option<&'a str>,

    /// Allowed drift in milliseconds. Negative disables the check; zero
    /// requires an exact match with the local clock.
    pub tolerance_ms: Option<i64>,
}

impl<'a> VerifyOptions<'a> {
    /// Creates options that use the verifier's defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            secret: None,
            tolerance_ms: None,
        }
    }

    /// Overrides the secret for this call.
    #[must_use]
    pub const fn with_secret(mut self, secret: &'a str) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Overrides the timestamp tolerance for this call.
    #[must_use]
    pub const fn with_tolerance_ms(mut self, tolerance_ms: i64) -> Self {
        self.tolerance_ms = Some(tolerance_ms);
        self
    }

    /// Disables the timestamp check for this call.
    ///
    /// Only appropriate for tests or replays from a trusted store.
    #[must_use]
    pub const fn without_tolerance(self) -> Self {
        self.with_tolerance_ms(-1)
    }
}

impl fmt::Debug for VerifyOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyOptions")
            .field("secret", &self.secret.map(|_| "<redacted>"))
            .field("tolerance_ms", &self.tolerance_ms)
            .finish()
    }
}

/// Verifies webhook deliveries and constructs events from them.
///
/// Holds the default signing secret, the default tolerance, and the clock.
/// Nothing is mutated after construction, so one instance can be shared
/// across threads.
///
/// # Type Parameters
///
/// - `C`: The clock used for the tolerance check (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::{
///     VerifyOptions, WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER, Webhooks,
///     compute_signature,
/// };
///
/// let webhooks = Webhooks::new("whsec_test");
/// let body = r#"{"type":"test","data":{"test":true}}"#;
/// let timestamp = "1700000000000";
/// let signature = compute_signature("whsec_test", timestamp, body);
/// let headers = [
///     (WEBHOOK_SIGNATURE_HEADER, signature.as_str()),
///     (WEBHOOK_TIMESTAMP_HEADER, timestamp),
/// ];
///
/// // The timestamp is far in the past, so only passes with the check disabled.
/// assert!(!webhooks.verify(body, &headers, VerifyOptions::new()));
/// let event = webhooks
///     .construct_event(body, &headers, VerifyOptions::new().without_tolerance())
///     .unwrap();
/// assert_eq!(event.type_tag(), Some("test"));
/// ```
pub struct Webhooks<C = SystemClock> {
    secret: String,
    tolerance_ms: i64,
    clock: C,
}

impl Webhooks<SystemClock> {
    /// Creates a verifier for the given secret using the system clock and
    /// the default 5 minute tolerance.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_ms: DEFAULT_TOLERANCE_MS,
            clock: SystemClock,
        }
    }
}

impl<C> Webhooks<C> {
    /// Sets a custom clock.
    ///
    /// This is primarily useful for testing the tolerance window.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Webhooks<C2> {
        Webhooks {
            secret: self.secret,
            tolerance_ms: self.tolerance_ms,
            clock,
        }
    }

    /// Sets the tolerance used when a call does not override it.
    #[must_use]
    pub const fn with_tolerance_ms(mut self, tolerance_ms: i64) -> Self {
        self.tolerance_ms = tolerance_ms;
        self
    }

    /// Returns the default tolerance in milliseconds.
    #[must_use]
    pub const fn tolerance_ms(&self) -> i64 {
        self.tolerance_ms
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C> fmt::Debug for Webhooks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhooks")
            .field("secret", &"<redacted>")
            .field("tolerance_ms", &self.tolerance_ms)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> Webhooks<C> {
    /// Verifies a delivery, returning `false` on any failure.
    ///
    /// Use [`Webhooks::verify_strict`] or [`Webhooks::construct_event`] when
    /// the reason matters.
    pub fn verify<'b, H>(
        &self,
        body: impl Into<WebhookBody<'b>>,
        headers: &H,
        options: VerifyOptions<'_>,
    ) -> bool
    where
        H: WebhookHeaders + ?Sized,
    {
        match self.verify_text(body.into(), headers, options) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(code = %e.code(), "Webhook verification failed");
                false
            }
        }
    }

    /// Verifies a delivery, returning the reason on failure.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookVerificationError`] with one of:
    /// - [`WebhookErrorCode::MissingSignature`] / [`WebhookErrorCode::MissingTimestamp`]
    /// - [`WebhookErrorCode::InvalidSignatureFormat`] if the signature lacks `v1=`
    /// - [`WebhookErrorCode::InvalidTimestamp`] if the timestamp is not an integer
    /// - [`WebhookErrorCode::TimestampOutOfRange`] if the timestamp is too far from now
    /// - [`WebhookErrorCode::InvalidBody`] if the body is not UTF-8
    /// - [`WebhookErrorCode::SignatureMismatch`] if the signature is wrong
    pub fn verify_strict<'b, H>(
        &self,
        body: impl Into<WebhookBody<'b>>,
        headers: &H,
        options: VerifyOptions<'_>,
    ) -> Result<(), WebhookVerificationError>
    where
        H: WebhookHeaders + ?Sized,
    {
        self.verify_text(body.into(), headers, options).map(|_| ())
    }

    /// Verifies a delivery and parses its body as a [`WebhookEvent`].
    ///
    /// The body is only parsed once the signature has been accepted. The
    /// `type` tag is not validated.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Webhooks::verify_strict`] unchanged, or
    /// [`WebhookErrorCode::InvalidJson`] if the body is not a JSON object.
    pub fn construct_event<'b, H>(
        &self,
        body: impl Into<WebhookBody<'b>>,
        headers: &H,
        options: VerifyOptions<'_>,
    ) -> Result<WebhookEvent, WebhookVerificationError>
    where
        H: WebhookHeaders + ?Sized,
    {
        let text = self.verify_text(body.into(), headers, options)?;

        // Anything but a JSON object fails to deserialize into the event map.
        let event: WebhookEvent = serde_json::from_str(text).map_err(|e| {
            let message = format!("Webhook payload is not valid JSON: {e}");
            WebhookVerificationError::new(WebhookErrorCode::InvalidJson, message).with_source(e)
        })?;

        tracing::trace!(
            event_type = event.type_tag().unwrap_or_default(),
            "Webhook event constructed"
        );
        Ok(event)
    }

    /// Runs every check in order and returns the decoded body on success.
    fn verify_text<'b, H>(
        &self,
        body: WebhookBody<'b>,
        headers: &H,
        options: VerifyOptions<'_>,
    ) -> Result<&'b str, WebhookVerificationError>
    where
        H: WebhookHeaders + ?Sized,
    {
        let secret = options.secret.unwrap_or(&self.secret);

        let signature = required_header(headers, WEBHOOK_SIGNATURE_HEADER)
            .ok_or_else(|| missing(WebhookErrorCode::MissingSignature, WEBHOOK_SIGNATURE_HEADER))?;
        let timestamp = required_header(headers, WEBHOOK_TIMESTAMP_HEADER)
            .ok_or_else(|| missing(WebhookErrorCode::MissingTimestamp, WEBHOOK_TIMESTAMP_HEADER))?;

        if !signature.starts_with(SIGNATURE_PREFIX) {
            return Err(WebhookVerificationError::new(
                WebhookErrorCode::InvalidSignatureFormat,
                format!("Signature header must start with {SIGNATURE_PREFIX}"),
            ));
        }

        let timestamp_ms = parse_timestamp(timestamp)?;

        let tolerance_ms = options.tolerance_ms.unwrap_or(self.tolerance_ms);
        self.check_tolerance(timestamp_ms, tolerance_ms)?;

        let text = body.as_text()?;
        let expected = compute_signature(secret, timestamp, text);

        if !signatures_match(&expected, signature) {
            return Err(WebhookVerificationError::new(
                WebhookErrorCode::SignatureMismatch,
                "Webhook signature does not match",
            ));
        }

        Ok(text)
    }

    /// Rejects timestamps further than `tolerance_ms` from now.
    ///
    /// A negative tolerance disables the check.
    fn check_tolerance(
        &self,
        timestamp_ms: i64,
        tolerance_ms: i64,
    ) -> Result<(), WebhookVerificationError> {
        let Ok(tolerance) = u64::try_from(tolerance_ms) else {
            return Ok(());
        };

        if self.clock.now_millis().abs_diff(timestamp_ms) > tolerance {
            return Err(WebhookVerificationError::new(
                WebhookErrorCode::TimestampOutOfRange,
                "Webhook timestamp is outside the allowed tolerance",
            ));
        }
        Ok(())
    }
}

/// Looks up a header, treating an empty value as absent.
fn required_header<'h, H>(headers: &'h H, name: &str) -> Option<&'h str>
where
    H: WebhookHeaders + ?Sized,
{
    headers.header(name).filter(|value| !value.is_empty())
}

/// Parses the timestamp header as base-10 milliseconds.
///
/// Surrounding whitespace is ignored. Integers beyond the `i64` range
/// saturate, so they fail the tolerance check rather than the parse.
fn parse_timestamp(timestamp: &str) -> Result<i64, WebhookVerificationError> {
    match timestamp.trim().parse::<i64>() {
        Ok(ms) => Ok(ms),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(WebhookVerificationError::new(
                WebhookErrorCode::InvalidTimestamp,
                "Timestamp header must be a number (milliseconds since epoch)",
            )
            .with_source(e)),
        },
    }
}

fn missing(code: WebhookErrorCode, header: &str) -> WebhookVerificationError {
    WebhookVerificationError::new(code, format!("Missing {header} header"))
}
