//! Per-market feed export configuration.
//!
//! A [`Feed`] describes how one shop's catalog is submitted for one
//! language/market pair: which templates fill the listing fields, which
//! merchant-center account receives the records, what UTM parameters
//! decorate outbound links, and how stock status maps to an availability
//! string. `language`, `market`, and `currency` are stored free-form and
//! case-normalized by the transformer (`en`/`US`/`USD`); alphabet and length
//! are the caller's responsibility upstream.

use serde::{Deserialize, Serialize};

use crate::mapping::{BrandSource, ProductIdentifier};

/// One shop's export configuration for a single language/market pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub shop_id: String,
    /// Content language, normalized to 2-letter lowercase on output.
    pub language: String,
    /// Target market, normalized to 2-letter uppercase on output.
    pub market: String,
    /// ISO 4217 code, normalized to 3-letter uppercase on output. Required:
    /// every emitted price carries it.
    pub currency: String,
    #[serde(default)]
    pub product_settings: ProductSettings,
    #[serde(default)]
    pub metadata: FeedMetadata,
    #[serde(default)]
    pub tracking: Tracking,
    /// Stock-status policy; `None` leaves availability unset unless a
    /// per-variant override supplies one.
    pub inventory: Option<Inventory>,
}

/// Feed-level listing defaults applied to every variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSettings {
    /// Title template, e.g. `"{{product_title}} - {{variant_title}}"`.
    pub title: Option<String>,
    /// Description template.
    pub description: Option<String>,
    /// Offer-id template; defaults to `"{{product_id}}_{{variant_id}}"`.
    pub offer_id: Option<String>,
    /// Which source field supplies the brand attribute.
    pub brand_submission: Option<BrandSource>,
    /// Which unique product identifier the feed submits, when any.
    pub product_identifier: Option<ProductIdentifier>,
    /// Feed-level sale-price gate. The per-variant mapping must also
    /// re-enable sale pricing before a sale price is emitted.
    #[serde(default)]
    pub enable_sale_price: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedMetadata {
    pub google_merchant_center: Option<MerchantCenterMetadata>,
}

/// Merchant-center submission target for this feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantCenterMetadata {
    pub account: Option<MerchantAccount>,
    /// Numeric taxonomy category ID, stringified into
    /// `googleProductCategory`.
    pub category_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantAccount {
    pub account_id: Option<String>,
}

/// UTM parameters appended to every decorated product link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracking {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

/// Availability policy for the feed.
///
/// `kind == "custom"` reads [`Inventory::custom_setting`]; any other kind is
/// used verbatim as the availability string (e.g. `"in_stock"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(rename = "type")]
    pub kind: String,
    pub custom_setting: Option<String>,
}

impl Feed {
    /// Returns the merchant-center account id, trimmed, when one is
    /// configured and non-blank.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.metadata
            .google_merchant_center
            .as_ref()
            .and_then(|gmc| gmc.account.as_ref())
            .and_then(|account| account.account_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Returns the numeric taxonomy category id when one is configured.
    #[must_use]
    pub fn category_id(&self) -> Option<u64> {
        self.metadata
            .google_merchant_center
            .as_ref()
            .and_then(|gmc| gmc.category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_feed() -> Feed {
        Feed {
            id: "feed-1".to_string(),
            shop_id: "shop-1".to_string(),
            language: "EN".to_string(),
            market: "us".to_string(),
            currency: "usd".to_string(),
            product_settings: ProductSettings::default(),
            metadata: FeedMetadata::default(),
            tracking: Tracking::default(),
            inventory: None,
        }
    }

    #[test]
    fn account_id_none_when_metadata_absent() {
        assert!(make_feed().account_id().is_none());
    }

    #[test]
    fn account_id_none_when_empty_string() {
        let mut feed = make_feed();
        feed.metadata.google_merchant_center = Some(MerchantCenterMetadata {
            account: Some(MerchantAccount {
                account_id: Some(String::new()),
            }),
            category_id: None,
        });
        assert!(feed.account_id().is_none());
    }

    #[test]
    fn account_id_is_trimmed_and_whitespace_only_is_none() {
        let mut feed = make_feed();
        feed.metadata.google_merchant_center = Some(MerchantCenterMetadata {
            account: Some(MerchantAccount {
                account_id: Some("   ".to_string()),
            }),
            category_id: None,
        });
        assert!(feed.account_id().is_none());

        feed.metadata.google_merchant_center = Some(MerchantCenterMetadata {
            account: Some(MerchantAccount {
                account_id: Some(" 123456 ".to_string()),
            }),
            category_id: None,
        });
        assert_eq!(feed.account_id(), Some("123456"));
    }

    #[test]
    fn account_id_returned_when_configured() {
        let mut feed = make_feed();
        feed.metadata.google_merchant_center = Some(MerchantCenterMetadata {
            account: Some(MerchantAccount {
                account_id: Some("123456".to_string()),
            }),
            category_id: Some(1604),
        });
        assert_eq!(feed.account_id(), Some("123456"));
        assert_eq!(feed.category_id(), Some(1604));
    }

    #[test]
    fn inventory_type_field_uses_json_name() {
        let inventory: Inventory =
            serde_json::from_str(r#"{"type":"custom","custom_setting":"preorder"}"#).unwrap();
        assert_eq!(inventory.kind, "custom");
        assert_eq!(inventory.custom_setting.as_deref(), Some("preorder"));
    }

    #[test]
    fn feed_deserializes_without_optional_sections() {
        let feed: Feed = serde_json::from_str(
            r#"{"id":"f","shop_id":"s","language":"en","market":"US","currency":"USD"}"#,
        )
        .unwrap();
        assert!(feed.inventory.is_none());
        assert!(!feed.product_settings.enable_sale_price);
        assert!(feed.tracking.utm_source.is_none());
    }
}
