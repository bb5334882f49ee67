//! Outbound-link decoration: UTM parameters and the `fdclid` click token.
//!
//! Every resolved product link (never the canonical link) gets the feed's
//! UTM parameters appended, then one opaque `fdclid` token identifying the
//! feed, the shop, and the click-token creation time. The token is
//! percent-encoded JSON: URL-safe and losslessly reversible for downstream
//! click attribution, not a security credential.
//!
//! Appending uses `?` before the first appended parameter and `&` between
//! subsequent ones — even when the base link already carries a query string.
//! Stored feed links were authored against that behavior, so it is kept
//! bit-for-bit.

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Query-parameter name carrying the click token.
pub const CLICK_TOKEN_PARAM: &str = "fdclid";

/// Decoded contents of an `fdclid` click token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickToken {
    pub feed_id: String,
    pub shop_id: String,
    pub created_at: DateTime<Utc>,
}

/// Encodes a click token for `created_at` as a URL-safe string.
#[must_use]
pub(crate) fn encode_click_token(
    feed_id: &str,
    shop_id: &str,
    created_at: DateTime<Utc>,
) -> String {
    let json = serde_json::json!({
        "feed_id": feed_id,
        "shop_id": shop_id,
        "created_at": created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
    })
    .to_string();
    utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string()
}

/// Decodes an `fdclid` token back into its [`ClickToken`] contents.
///
/// Returns `None` for tokens that are not valid percent-encoded UTF-8 JSON
/// of the expected shape.
#[must_use]
pub fn decode_click_token(token: &str) -> Option<ClickToken> {
    let json = percent_decode_str(token).decode_utf8().ok()?;
    serde_json::from_str(&json).ok()
}

/// Appends `params` to `link`: first parameter joined with `?`, the rest
/// with `&`. Parameter values are taken verbatim.
#[must_use]
pub(crate) fn append_params(link: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return link.to_string();
    }
    let query: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{link}?{}", query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frozen_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn click_token_roundtrips() {
        let encoded = encode_click_token("feed-1", "shop-1", frozen_clock());
        let decoded = decode_click_token(&encoded).expect("token should decode");
        assert_eq!(decoded.feed_id, "feed-1");
        assert_eq!(decoded.shop_id, "shop-1");
        assert_eq!(decoded.created_at, frozen_clock());
    }

    #[test]
    fn click_token_is_url_safe() {
        let encoded = encode_click_token("feed-1", "shop-1", frozen_clock());
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '%'));
    }

    #[test]
    fn click_token_stable_for_frozen_clock() {
        let a = encode_click_token("feed-1", "shop-1", frozen_clock());
        let b = encode_click_token("feed-1", "shop-1", frozen_clock());
        assert_eq!(a, b);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_click_token("%zz").is_none());
        assert!(decode_click_token("notjson").is_none());
    }

    #[test]
    fn append_params_uses_question_mark_then_ampersand() {
        let link = append_params(
            "https://shop.com/products/tee",
            &[
                ("utm_source".to_string(), "google".to_string()),
                ("utm_medium".to_string(), "cpc".to_string()),
            ],
        );
        assert_eq!(link, "https://shop.com/products/tee?utm_source=google&utm_medium=cpc");
    }

    #[test]
    fn append_params_ignores_existing_query_string() {
        // Links that already carry a query still get `?` for the first
        // appended parameter.
        let link = append_params(
            "https://shop.com/products/tee?variant=v1",
            &[("fdclid".to_string(), "abc".to_string())],
        );
        assert_eq!(link, "https://shop.com/products/tee?variant=v1?fdclid=abc");
    }

    #[test]
    fn append_params_empty_list_is_identity() {
        assert_eq!(
            append_params("https://shop.com/products/tee", &[]),
            "https://shop.com/products/tee"
        );
    }
}
