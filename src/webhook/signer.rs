//! Sender-side signing, for tests and local tooling.
//!
//! Produces the headers the platform attaches to a delivery so receivers
//! can exercise their endpoints with correctly signed requests.

use std::fmt;

use http::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};

use crate::time::{Clock, SystemClock};

use super::signature::compute_signature;
use super::{
    WEBHOOK_CALL_HEADER, WEBHOOK_EVENT_HEADER, WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER,
};

/// The signature headers for one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Timestamp header value (milliseconds since the epoch).
    pub timestamp: String,
    /// Signature header value (`v1=<hex>`).
    pub signature: String,
    /// Optional event type header value.
    pub event_type: Option<String>,
    /// Optional delivery identifier header value.
    pub call_id: Option<String>,
}

impl SignedPayload {
    /// Sets the informational event type header.
    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Sets the informational delivery identifier header.
    #[must_use]
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Returns the headers as `(name, value)` pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            (WEBHOOK_SIGNATURE_HEADER, self.signature.as_str()),
            (WEBHOOK_TIMESTAMP_HEADER, self.timestamp.as_str()),
        ];
        if let Some(event_type) = &self.event_type {
            pairs.push((WEBHOOK_EVENT_HEADER, event_type.as_str()));
        }
        if let Some(call_id) = &self.call_id {
            pairs.push((WEBHOOK_CALL_HEADER, call_id.as_str()));
        }
        pairs
    }

    /// Builds an [`http::HeaderMap`] carrying these headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the event type or call identifier contains
    /// characters not allowed in a header value.
    pub fn to_header_map(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-usesend-signature"),
            HeaderValue::from_str(&self.signature)?,
        );
        headers.insert(
            HeaderName::from_static("x-usesend-timestamp"),
            HeaderValue::from_str(&self.timestamp)?,
        );
        if let Some(event_type) = &self.event_type {
            headers.insert(
                HeaderName::from_static("x-usesend-event"),
                HeaderValue::from_str(event_type)?,
            );
        }
        if let Some(call_id) = &self.call_id {
            headers.insert(
                HeaderName::from_static("x-usesend-call"),
                HeaderValue::from_str(call_id)?,
            );
        }
        Ok(headers)
    }
}

/// Signs delivery bodies with a secret.
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::{VerifyOptions, WebhookSigner, Webhooks};
///
/// let body = r#"{"type":"test","data":{}}"#;
/// let signed = WebhookSigner::new("whsec_test").sign(body);
///
/// let webhooks = Webhooks::new("whsec_test");
/// assert!(webhooks.verify(body, &signed.pairs(), VerifyOptions::new()));
/// ```
pub struct WebhookSigner<C = SystemClock> {
    secret: String,
    clock: C,
}

impl WebhookSigner<SystemClock> {
    /// Creates a signer using the system clock.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            clock: SystemClock,
        }
    }
}

impl<C> WebhookSigner<C> {
    /// Sets a custom clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> WebhookSigner<C2> {
        WebhookSigner {
            secret: self.secret,
            clock,
        }
    }

    /// Signs `body` as if sent at `timestamp_ms`.
    #[must_use]
    pub fn sign_at(&self, timestamp_ms: i64, body: &str) -> SignedPayload {
        let timestamp = timestamp_ms.to_string();
        let signature = compute_signature(&self.secret, &timestamp, body);
        SignedPayload {
            timestamp,
            signature,
            event_type: None,
            call_id: None,
        }
    }
}

impl<C: Clock> WebhookSigner<C> {
    /// Signs `body` with the current time.
    #[must_use]
    pub fn sign(&self, body: &str) -> SignedPayload {
        self.sign_at(self.clock.now_millis(), body)
    }
}

impl<C> fmt::Debug for WebhookSigner<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSigner")
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}
