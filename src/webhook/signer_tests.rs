//! Tests for signature computation and `WebhookSigner`.

use super::signature::{SIGNATURE_PREFIX, compute_signature, signatures_match};
use super::signer::WebhookSigner;
use super::verifier::{VerifyOptions, Webhooks};
use crate::time::MockClock;

mod compute {
    use super::*;

    #[test]
    fn matches_known_vector() {
        // HMAC-SHA256("whsec_test", "1700000000000.{}"), computed independently.
        let expected = {
            use hmac::{Hmac, Mac};
            let mut mac = Hmac::<sha2::Sha256>::new_from_slice(b"whsec_test").unwrap();
            mac.update(b"1700000000000.{}");
            format!("v1={}", hex::encode(mac.finalize().into_bytes()))
        };

        assert_eq!(compute_signature("whsec_test", "1700000000000", "{}"), expected);
    }

    #[test]
    fn is_prefixed_lowercase_hex() {
        let signature = compute_signature("secret", "1", "body");
        let hex = signature.strip_prefix(SIGNATURE_PREFIX).unwrap();

        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn depends_on_every_input() {
        let base = compute_signature("secret", "1", "body");

        assert_ne!(base, compute_signature("secret2", "1", "body"));
        assert_ne!(base, compute_signature("secret", "2", "body"));
        assert_ne!(base, compute_signature("secret", "1", "body "));
    }

    #[test]
    fn empty_secret_is_accepted() {
        assert!(compute_signature("", "1", "body").starts_with(SIGNATURE_PREFIX));
    }

    #[test]
    fn secret_longer_than_block_size_is_accepted() {
        let secret = "k".repeat(200);

        let signature = compute_signature(&secret, "1", "body");

        assert!(signature.starts_with(SIGNATURE_PREFIX));
        assert_ne!(signature, compute_signature(&secret[..199], "1", "body"));
    }
}

mod constant_time_compare {
    use super::*;

    #[test]
    fn equal_strings_match() {
        assert!(signatures_match("v1=abc", "v1=abc"));
    }

    #[test]
    fn different_strings_do_not_match() {
        assert!(!signatures_match("v1=abc", "v1=abd"));
        assert!(!signatures_match("v1=abc", "v1=ab"));
        assert!(!signatures_match("v1=abc", ""));
    }
}

mod signing {
    use super::*;

    #[test]
    fn sign_uses_clock_time() {
        let signer = WebhookSigner::new("whsec_test").with_clock(MockClock::new(1_234));
        let signed = signer.sign("{}");

        assert_eq!(signed.timestamp, "1234");
        assert_eq!(signed.signature, compute_signature("whsec_test", "1234", "{}"));
    }

    #[test]
    fn signed_payload_verifies() {
        let clock_ms = 1_770_544_800_000;
        let body = r#"{"type":"test","data":{}}"#;
        let signed = WebhookSigner::new("whsec_test")
            .with_clock(MockClock::new(clock_ms))
            .sign(body);
        let webhooks = Webhooks::new("whsec_test").with_clock(MockClock::new(clock_ms));

        assert!(webhooks.verify(body, &signed.pairs(), VerifyOptions::new()));
        assert!(webhooks.verify(
            body,
            &signed.to_header_map().unwrap(),
            VerifyOptions::new()
        ));
    }

    #[test]
    fn pairs_include_informational_headers_when_set() {
        let signed = WebhookSigner::new("s")
            .sign_at(1, "{}")
            .with_event_type("email.bounced")
            .with_call_id("call_1");
        let pairs = signed.pairs();

        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("X-UseSend-Event", "email.bounced")));
        assert!(pairs.contains(&("X-UseSend-Call", "call_1")));
    }

    #[test]
    fn header_map_contains_all_headers() {
        let signed = WebhookSigner::new("s")
            .sign_at(1, "{}")
            .with_event_type("email.bounced");
        let map = signed.to_header_map().unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("x-usesend-timestamp").unwrap(), "1");
        assert_eq!(map.get("X-UseSend-Event").unwrap(), "email.bounced");
    }

    #[test]
    fn invalid_header_value_is_an_error() {
        let signed = WebhookSigner::new("s")
            .sign_at(1, "{}")
            .with_call_id("line\nbreak");

        assert!(signed.to_header_map().is_err());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let output = format!("{:?}", WebhookSigner::new("whsec_hidden"));

        assert!(!output.contains("whsec_hidden"));
    }
}
