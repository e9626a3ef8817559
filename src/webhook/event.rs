//! Webhook event envelope and typed payloads.
//!
//! [`WebhookEvent`] is what [`Webhooks::construct_event`] returns: the
//! verified JSON object, kept as-is. The `type` tag is not checked during
//! construction. Callers narrow it with [`WebhookEvent::payload`] and a
//! `match` on [`EventPayload`].
//!
//! [`Webhooks::construct_event`]: super::Webhooks::construct_event

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event type tags sent by the platform.
///
/// Unrecognized tags are preserved in [`WebhookEventType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEventType {
    EmailQueued,
    EmailSent,
    EmailDeliveryDelayed,
    EmailDelivered,
    EmailBounced,
    EmailRejected,
    EmailRenderingFailure,
    EmailComplained,
    EmailFailed,
    EmailCancelled,
    EmailSuppressed,
    EmailOpened,
    EmailClicked,
    ContactCreated,
    ContactUpdated,
    ContactDeleted,
    DomainCreated,
    DomainVerified,
    DomainUpdated,
    DomainDeleted,
    Test,
    /// A tag this crate does not know about.
    Other(String),
}

impl WebhookEventType {
    /// Returns the wire tag, e.g. `email.bounced`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailQueued => "email.queued",
            Self::EmailSent => "email.sent",
            Self::EmailDeliveryDelayed => "email.delivery_delayed",
            Self::EmailDelivered => "email.delivered",
            Self::EmailBounced => "email.bounced",
            Self::EmailRejected => "email.rejected",
            Self::EmailRenderingFailure => "email.rendering_failure",
            Self::EmailComplained => "email.complained",
            Self::EmailFailed => "email.failed",
            Self::EmailCancelled => "email.cancelled",
            Self::EmailSuppressed => "email.suppressed",
            Self::EmailOpened => "email.opened",
            Self::EmailClicked => "email.clicked",
            Self::ContactCreated => "contact.created",
            Self::ContactUpdated => "contact.updated",
            Self::ContactDeleted => "contact.deleted",
            Self::DomainCreated => "domain.created",
            Self::DomainVerified => "domain.verified",
            Self::DomainUpdated => "domain.updated",
            Self::DomainDeleted => "domain.deleted",
            Self::Test => "test",
            Self::Other(tag) => tag,
        }
    }

    /// Returns true for email events whose data has no extra section.
    #[must_use]
    pub const fn is_basic_email(&self) -> bool {
        matches!(
            self,
            Self::EmailQueued
                | Self::EmailSent
                | Self::EmailDeliveryDelayed
                | Self::EmailDelivered
                | Self::EmailRejected
                | Self::EmailRenderingFailure
                | Self::EmailComplained
                | Self::EmailCancelled
        )
    }
}

impl From<&str> for WebhookEventType {
    fn from(tag: &str) -> Self {
        match tag {
            "email.queued" => Self::EmailQueued,
            "email.sent" => Self::EmailSent,
            "email.delivery_delayed" => Self::EmailDeliveryDelayed,
            "email.delivered" => Self::EmailDelivered,
            "email.bounced" => Self::EmailBounced,
            "email.rejected" => Self::EmailRejected,
            "email.rendering_failure" => Self::EmailRenderingFailure,
            "email.complained" => Self::EmailComplained,
            "email.failed" => Self::EmailFailed,
            "email.cancelled" => Self::EmailCancelled,
            "email.suppressed" => Self::EmailSuppressed,
            "email.opened" => Self::EmailOpened,
            "email.clicked" => Self::EmailClicked,
            "contact.created" => Self::ContactCreated,
            "contact.updated" => Self::ContactUpdated,
            "contact.deleted" => Self::ContactDeleted,
            "domain.created" => Self::DomainCreated,
            "domain.verified" => Self::DomainVerified,
            "domain.updated" => Self::DomainUpdated,
            "domain.deleted" => Self::DomainDeleted,
            "test" => Self::Test,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified webhook event.
///
/// Wraps the decoded JSON object without schema validation. Index by key
/// to reach raw fields; missing keys index to `null`.
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::{EventPayload, WebhookEvent};
///
/// let event: WebhookEvent = serde_json::from_str(
///     r#"{"type":"email.bounced","data":{"id":"e1","status":"BOUNCED",
///         "from":"a@example.com","to":["b@example.com"],
///         "occurredAt":"2026-02-08T10:00:00.000Z",
///         "bounce":{"type":"Permanent","subType":"General"}}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(event["data"]["bounce"]["type"], "Permanent");
/// match event.payload().unwrap() {
///     EventPayload::EmailBounced(data) => assert_eq!(data.bounce.bounce_type, "Permanent"),
///     other => panic!("unexpected payload: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookEvent(Map<String, Value>);

static NULL: Value = Value::Null;

impl WebhookEvent {
    /// Returns the raw `type` tag, if it is a string.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Returns the parsed `type` tag, if present.
    #[must_use]
    pub fn event_type(&self) -> Option<WebhookEventType> {
        self.type_tag().map(WebhookEventType::from)
    }

    /// Returns the event identifier, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Returns the `createdAt` timestamp string, if present.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.0.get("createdAt").and_then(Value::as_str)
    }

    /// Returns the raw `data` value, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the event, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Narrows the event into a typed payload according to its `type` tag.
    ///
    /// Unknown tags yield [`EventPayload::Unknown`] with the raw data.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is missing or `data` does not have the
    /// shape the tag implies.
    pub fn payload(&self) -> Result<EventPayload, serde_json::Error> {
        use serde::de::Error as _;

        let event_type = self
            .event_type()
            .ok_or_else(|| serde_json::Error::missing_field("type"))?;
        let data = self.data().unwrap_or(&NULL);

        let payload = match event_type {
            WebhookEventType::EmailBounced => {
                EventPayload::EmailBounced(EmailBouncedData::deserialize(data)?)
            }
            WebhookEventType::EmailFailed => {
                EventPayload::EmailFailed(EmailFailedData::deserialize(data)?)
            }
            WebhookEventType::EmailSuppressed => {
                EventPayload::EmailSuppressed(EmailSuppressedData::deserialize(data)?)
            }
            WebhookEventType::EmailOpened => {
                EventPayload::EmailOpened(EmailOpenedData::deserialize(data)?)
            }
            WebhookEventType::EmailClicked => {
                EventPayload::EmailClicked(EmailClickedData::deserialize(data)?)
            }
            WebhookEventType::ContactCreated
            | WebhookEventType::ContactUpdated
            | WebhookEventType::ContactDeleted => {
                EventPayload::Contact(event_type, ContactEventData::deserialize(data)?)
            }
            WebhookEventType::DomainCreated
            | WebhookEventType::DomainVerified
            | WebhookEventType::DomainUpdated
            | WebhookEventType::DomainDeleted => {
                EventPayload::Domain(event_type, DomainEventData::deserialize(data)?)
            }
            WebhookEventType::Test => EventPayload::Test(TestEventData::deserialize(data)?),
            WebhookEventType::Other(tag) => EventPayload::Unknown(tag, data.clone()),
            basic => EventPayload::Email(basic, EmailEventData::deserialize(data)?),
        };
        Ok(payload)
    }
}

impl Index<&str> for WebhookEvent {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

/// Typed view of an event's `data`, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// An email event with the common shape (queued, sent, delivered, ...).
    Email(WebhookEventType, EmailEventData),
    EmailBounced(EmailBouncedData),
    EmailFailed(EmailFailedData),
    EmailSuppressed(EmailSuppressedData),
    EmailOpened(EmailOpenedData),
    EmailClicked(EmailClickedData),
    /// A contact was created, updated, or deleted.
    Contact(WebhookEventType, ContactEventData),
    /// A domain was created, verified, updated, or deleted.
    Domain(WebhookEventType, DomainEventData),
    /// A test delivery triggered from the dashboard.
    Test(TestEventData),
    /// A tag this crate does not know, with its raw data.
    Unknown(String, Value),
}

/// Data common to every email event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailEventData {
    pub id: String,
    pub status: String,
    pub from: String,
    pub to: Vec<String>,
    pub occurred_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BounceDetails {
    /// `Permanent`, `Transient`, or `Undetermined`.
    #[serde(rename = "type")]
    pub bounce_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailBouncedData {
    #[serde(flatten)]
    pub email: EmailEventData,
    pub bounce: BounceDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetails {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailFailedData {
    #[serde(flatten)]
    pub email: EmailEventData,
    pub failed: FailureDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionDetails {
    #[serde(rename = "type")]
    pub suppression_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSuppressedData {
    #[serde(flatten)]
    pub email: EmailEventData,
    pub suppression: SuppressionDetails,
}

/// Client details recorded with an open or click.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailOpenedData {
    #[serde(flatten)]
    pub email: EmailEventData,
    pub open: EngagementDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickDetails {
    pub url: String,
    #[serde(flatten)]
    pub client: EngagementDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailClickedData {
    #[serde(flatten)]
    pub email: EmailEventData,
    pub click: ClickDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEventData {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_book_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEventData {
    pub id: i64,
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
}
