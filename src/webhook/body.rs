//! Raw webhook body handling.

use super::{WebhookErrorCode, WebhookVerificationError};

/// The raw body of an inbound webhook request.
///
/// Frameworks hand over either the decoded text or the raw bytes; both
/// are accepted and signed over the same UTF-8 text.
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::WebhookBody;
///
/// let from_text = WebhookBody::from(r#"{"type":"test"}"#);
/// let from_bytes = WebhookBody::from(br#"{"type":"test"}"#);
///
/// assert_eq!(from_text.as_text().unwrap(), from_bytes.as_text().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookBody<'a> {
    /// Already-decoded text.
    Text(&'a str),
    /// Raw bytes, expected to be UTF-8.
    Bytes(&'a [u8]),
}

impl<'a> WebhookBody<'a> {
    /// Returns the body as text.
    ///
    /// Text is returned unchanged. Bytes are decoded strictly as UTF-8 with
    /// no replacement of invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookErrorCode::InvalidBody`] if the bytes are not valid UTF-8.
    pub fn as_text(&self) -> Result<&'a str, WebhookVerificationError> {
        match *self {
            Self::Text(text) => Ok(text),
            Self::Bytes(bytes) => std::str::from_utf8(bytes).map_err(|e| {
                WebhookVerificationError::new(
                    WebhookErrorCode::InvalidBody,
                    "Webhook body must be valid UTF-8.",
                )
                .with_source(e)
            }),
        }
    }
}

impl<'a> From<&'a str> for WebhookBody<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for WebhookBody<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for WebhookBody<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for WebhookBody<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for WebhookBody<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
