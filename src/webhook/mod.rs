//! Webhook layer for verifying inbound UseSend deliveries.
//!
//! This module provides types and functions for:
//! - Verifying delivery signatures and timestamps ([`Webhooks`])
//! - Parsing verified bodies into events ([`WebhookEvent`], [`EventPayload`])
//! - Looking up headers across framework representations ([`WebhookHeaders`])
//! - Accepting text or byte bodies ([`WebhookBody`])
//! - Signing bodies the way the platform does ([`WebhookSigner`])
//!
//! # Example
//!
//! ```
//! use usesend_webhooks::webhook::{EventPayload, VerifyOptions, WebhookSigner, Webhooks};
//!
//! let body = r#"{"id":"evt_1","type":"email.delivered","data":{"id":"email_1",
//!     "status":"DELIVERED","from":"a@example.com","to":["b@example.com"],
//!     "occurredAt":"2026-02-08T10:00:00.000Z"}}"#;
//! let headers = WebhookSigner::new("whsec_test").sign(body).to_header_map().unwrap();
//!
//! let webhooks = Webhooks::new("whsec_test");
//! let event = webhooks.construct_event(body, &headers, VerifyOptions::new()).unwrap();
//!
//! match event.payload().unwrap() {
//!     EventPayload::Email(kind, data) => println!("{kind}: {:?}", data.to),
//!     other => println!("unhandled: {other:?}"),
//! }
//! ```

mod body;
mod error;
mod event;
mod headers;
mod signature;
mod signer;
mod verifier;

#[cfg(test)]
mod headers_tests;
#[cfg(test)]
mod signer_tests;

pub use body::WebhookBody;
pub use error::{WebhookErrorCode, WebhookVerificationError};
pub use event::{
    BounceDetails, ClickDetails, ContactEventData, DomainEventData, EmailBouncedData,
    EmailClickedData, EmailEventData, EmailFailedData, EmailOpenedData, EmailSuppressedData,
    EngagementDetails, EventPayload, FailureDetails, SuppressionDetails, TestEventData,
    WebhookEvent, WebhookEventType,
};
pub use headers::{
    HeaderValues, WEBHOOK_CALL_HEADER, WEBHOOK_EVENT_HEADER, WEBHOOK_SIGNATURE_HEADER,
    WEBHOOK_TIMESTAMP_HEADER, WebhookHeaders,
};
pub use signature::{DEFAULT_TOLERANCE_MS, SIGNATURE_PREFIX, compute_signature, signatures_match};
pub use signer::{SignedPayload, WebhookSigner};
pub use verifier::{VerifyOptions, Webhooks};
