//! Webhook header names and case-insensitive header lookup.
//!
//! HTTP frameworks expose request headers in different shapes: a typed
//! [`http::HeaderMap`], a plain map of names to one value, a map of names
//! to every value received, or a list of pairs. [`WebhookHeaders`] gives
//! the verifier a single lookup over all of them.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Header carrying the `v1=<hex>` signature.
pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-UseSend-Signature";

/// Header carrying the signing timestamp in milliseconds since the epoch.
pub const WEBHOOK_TIMESTAMP_HEADER: &str = "X-UseSend-Timestamp";

/// Header carrying the event type. Informational only.
pub const WEBHOOK_EVENT_HEADER: &str = "X-UseSend-Event";

/// Header carrying the delivery identifier. Informational only.
pub const WEBHOOK_CALL_HEADER: &str = "X-UseSend-Call";

/// Read access to request headers by name, ignoring ASCII case.
///
/// Returning `None` means "absent"; the verifier turns that into the
/// appropriate missing-header error.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use usesend_webhooks::webhook::WebhookHeaders;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-usesend-timestamp".to_string(), "1700000000000".to_string());
///
/// assert_eq!(headers.header("X-UseSend-Timestamp"), Some("1700000000000"));
/// assert_eq!(headers.header("X-UseSend-Signature"), None);
/// ```
pub trait WebhookHeaders {
    /// Returns the first value of the header `name`, if present.
    fn header(&self, name: &str) -> Option<&str>;
}

/// A header value as stored by the caller's framework.
///
/// Repeated headers are commonly surfaced as a list; lookup takes the
/// first element, and an empty list counts as absent.
pub trait HeaderValues {
    /// Returns the first value, if any.
    fn first_value(&self) -> Option<&str>;
}

impl HeaderValues for str {
    fn first_value(&self) -> Option<&str> {
        Some(self)
    }
}

impl HeaderValues for String {
    fn first_value(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: HeaderValues + ?Sized> HeaderValues for &T {
    fn first_value(&self) -> Option<&str> {
        (**self).first_value()
    }
}

impl<T: HeaderValues> HeaderValues for [T] {
    fn first_value(&self) -> Option<&str> {
        self.first().and_then(HeaderValues::first_value)
    }
}

impl<T: HeaderValues> HeaderValues for Vec<T> {
    fn first_value(&self) -> Option<&str> {
        self.as_slice().first_value()
    }
}

impl<T: HeaderValues> HeaderValues for Option<T> {
    fn first_value(&self) -> Option<&str> {
        self.as_ref().and_then(HeaderValues::first_value)
    }
}

/// Finds `name` among `entries`, preferring an exact match over a
/// case-insensitive one.
fn find_in_pairs<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)> + Clone,
    name: &str,
) -> Option<&'a str>
where
    K: AsRef<str> + 'a,
    V: HeaderValues + 'a,
{
    let value = entries
        .clone()
        .find(|(key, _)| key.as_ref() == name)
        .or_else(|| {
            entries
                .clone()
                .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
        })
        .map(|(_, value)| value)?;
    value.first_value()
}

impl WebhookHeaders for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        // `HeaderMap` normalizes names; values that are not visible ASCII are
        // treated as absent.
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

impl<K, V, S> WebhookHeaders for HashMap<K, V, S>
where
    K: Borrow<str> + AsRef<str> + Hash + Eq,
    V: HeaderValues,
    S: BuildHasher,
{
    fn header(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(value) => value.first_value(),
            None => self
                .iter()
                .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
                .and_then(|(_, value)| value.first_value()),
        }
    }
}

impl<K, V> WebhookHeaders for BTreeMap<K, V>
where
    K: Borrow<str> + AsRef<str> + Ord,
    V: HeaderValues,
{
    fn header(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(value) => value.first_value(),
            None => self
                .iter()
                .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
                .and_then(|(_, value)| value.first_value()),
        }
    }
}

impl<K: AsRef<str>, V: HeaderValues> WebhookHeaders for [(K, V)] {
    fn header(&self, name: &str) -> Option<&str> {
        find_in_pairs(self.iter().map(|(key, value)| (key, value)), name)
    }
}

impl<K: AsRef<str>, V: HeaderValues, const N: usize> WebhookHeaders for [(K, V); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<K: AsRef<str>, V: HeaderValues> WebhookHeaders for Vec<(K, V)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<T: WebhookHeaders + ?Sized> WebhookHeaders for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}
