//! Tests for header lookup across header representations.

use std::collections::{BTreeMap, HashMap};

use super::headers::{HeaderValues, WebhookHeaders};
use super::{WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER};

mod single_valued_maps {
    use super::*;

    #[test]
    fn exact_name_is_found() {
        let mut headers = HashMap::new();
        headers.insert(WEBHOOK_SIGNATURE_HEADER.to_string(), "v1=abc".to_string());

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), Some("v1=abc"));
    }

    #[test]
    fn lowercase_stored_name_matches_canonical_lookup() {
        let mut headers = HashMap::new();
        headers.insert("x-usesend-signature", "v1=abc");

        assert_eq!(headers.header("X-UseSend-Signature"), Some("v1=abc"));
    }

    #[test]
    fn uppercase_stored_name_matches() {
        let mut headers = BTreeMap::new();
        headers.insert("X-USESEND-TIMESTAMP".to_string(), "123".to_string());

        assert_eq!(headers.header(WEBHOOK_TIMESTAMP_HEADER), Some("123"));
    }

    #[test]
    fn absent_header_is_none() {
        let headers: HashMap<String, String> = HashMap::new();

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), None);
    }

    #[test]
    fn exact_match_wins_over_case_insensitive_match() {
        let mut headers = BTreeMap::new();
        headers.insert("x-usesend-signature", "lower");
        headers.insert("X-UseSend-Signature", "exact");

        assert_eq!(headers.header("X-UseSend-Signature"), Some("exact"));
    }
}

mod multi_valued_maps {
    use super::*;

    #[test]
    fn first_value_is_returned() {
        let mut headers = HashMap::new();
        headers.insert(
            "x-usesend-signature".to_string(),
            vec!["v1=first".to_string(), "v1=second".to_string()],
        );

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), Some("v1=first"));
    }

    #[test]
    fn empty_list_is_absent() {
        let mut headers: HashMap<&str, Vec<&str>> = HashMap::new();
        headers.insert(WEBHOOK_SIGNATURE_HEADER, Vec::new());

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), None);
    }

    #[test]
    fn null_value_is_absent() {
        let mut headers: HashMap<String, Option<String>> = HashMap::new();
        headers.insert(WEBHOOK_SIGNATURE_HEADER.to_string(), None);

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), None);
    }
}

mod pair_lists {
    use super::*;

    #[test]
    fn array_of_pairs_is_searched_case_insensitively() {
        let headers = [("content-type", "application/json"), ("x-usesend-timestamp", "1")];

        assert_eq!(headers.header(WEBHOOK_TIMESTAMP_HEADER), Some("1"));
        assert_eq!(headers.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn vec_of_owned_pairs_is_supported() {
        let headers = vec![("X-UseSend-Signature".to_string(), "v1=abc".to_string())];

        assert_eq!(headers.header("x-usesend-signature"), Some("v1=abc"));
    }

    #[test]
    fn first_matching_pair_wins() {
        let headers = [("x-usesend-call", "a"), ("X-UseSend-Call", "b"), ("x-usesend-call", "c")];

        assert_eq!(headers.header("X-UseSend-Call"), Some("b"));
        assert_eq!(headers.header("X-USESEND-CALL"), Some("a"));
    }

    #[test]
    fn reference_to_headers_also_implements_lookup() {
        fn lookup(headers: impl WebhookHeaders) -> Option<String> {
            headers.header(WEBHOOK_TIMESTAMP_HEADER).map(str::to_string)
        }
        let headers = vec![("x-usesend-timestamp", "42")];

        assert_eq!(lookup(&headers), Some("42".to_string()));
    }
}

mod http_header_map {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-usesend-signature", "v1=abc".parse().unwrap());

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), Some("v1=abc"));
        assert_eq!(headers.header("X-USESEND-SIGNATURE"), Some("v1=abc"));
    }

    #[test]
    fn repeated_header_returns_first_value() {
        let mut headers = http::HeaderMap::new();
        headers.append("x-usesend-timestamp", "1".parse().unwrap());
        headers.append("x-usesend-timestamp", "2".parse().unwrap());

        assert_eq!(headers.header(WEBHOOK_TIMESTAMP_HEADER), Some("1"));
    }

    #[test]
    fn opaque_value_is_absent() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            "x-usesend-signature",
            http::HeaderValue::from_bytes(b"v1=\xfa").unwrap(),
        );

        assert_eq!(headers.header(WEBHOOK_SIGNATURE_HEADER), None);
    }

    #[test]
    fn invalid_lookup_name_is_absent() {
        let headers = http::HeaderMap::new();

        assert_eq!(headers.header("bad header"), None);
    }
}

mod header_values {
    use super::*;

    #[test]
    fn single_values() {
        assert_eq!("a".first_value(), Some("a"));
        assert_eq!(String::from("b").first_value(), Some("b"));
    }

    #[test]
    fn sequences() {
        assert_eq!(vec!["a", "b"].first_value(), Some("a"));
        assert_eq!(Vec::<String>::new().first_value(), None);
        assert_eq!(["x".to_string()][..].first_value(), Some("x"));
    }
}
