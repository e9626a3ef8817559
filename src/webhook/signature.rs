//! HMAC-SHA256 signature computation and comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Version marker prepended to every signature.
pub const SIGNATURE_PREFIX: &str = "v1=";

/// Default allowed drift between the signed timestamp and the local clock
/// (5 minutes, in milliseconds).
pub const DEFAULT_TOLERANCE_MS: i64 = 5 * 60 * 1000;

/// Computes the signature header value for a delivery.
///
/// The signed message is `"{timestamp}.{body}"`, using the timestamp
/// string exactly as sent and the body exactly as received. The result is
/// `v1=` followed by the lowercase hex HMAC-SHA256 digest.
///
/// # Example
///
/// ```
/// use usesend_webhooks::webhook::compute_signature;
///
/// let signature = compute_signature("whsec_test", "1700000000000", "{}");
/// assert!(signature.starts_with("v1="));
/// assert_eq!(signature.len(), 3 + 64);
/// ```
#[must_use]
pub fn compute_signature(secret: &str, timestamp: &str, body: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body.as_bytes());

    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Compares two signature strings in constant time.
///
/// Running time does not depend on the position of the first differing
/// byte. Strings of different length compare unequal.
#[must_use]
pub fn signatures_match(expected: &str, received: &str) -> bool {
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
