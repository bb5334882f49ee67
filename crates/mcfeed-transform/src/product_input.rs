//! Output record types for catalog ingestion.
//!
//! [`ProductInput`] serializes to the exact payload shape the catalog
//! ingestion API expects: camelCase member names, optional attributes
//! omitted entirely when unresolved (never `null`, never empty strings),
//! currency amounts as integer micros strings. The excluded REST layer
//! submits the serialized record as-is.

use serde::{Deserialize, Serialize};

/// Sales channel constant; this engine only produces online offers.
pub const CHANNEL_ONLINE: &str = "ONLINE";

/// One normalized product input, keyed by
/// `{channel}~{contentLanguage}~{feedLabel}~{offerId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Full resource name
    /// (`accounts/{accountId}/productInputs/{channel}~{lang}~{label}~{offerId}`);
    /// present only when the feed resolves a merchant-center account id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub channel: String,
    pub offer_id: String,
    /// Always exactly 2 lowercase characters (case-normalized feed
    /// language).
    pub content_language: String,
    /// Always exactly 2 uppercase characters (case-normalized feed market).
    pub feed_label: String,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

/// Typed listing attributes. `item_group_id`, `title`, `description`,
/// `identifier_exists`, and `price` are always present; everything else is
/// conditional on its field group resolving a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub item_group_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub identifier_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_image_links: Option<Vec<String>>,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    /// Sale window as `start/end`, verbatim from the override document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price_effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pricing_min_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_retail_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_label_4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bundle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipack: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_efficiency_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_energy_efficiency_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_energy_efficiency_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_weight: Option<MeasureAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_length: Option<MeasureAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_width: Option<MeasureAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_height: Option<MeasureAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_transit_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_transit_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_handling_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_handling_time: Option<i64>,
}

/// A currency amount in integer micros (decimal amount × 1,000,000).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Always an integer-valued string of digits.
    pub amount_micros: String,
    /// Always exactly 3 uppercase characters.
    pub currency_code: String,
}

/// A value + unit pair, e.g. shipping weight `{ value: 1.5, unit: "kg" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureAttribute {
    pub value: f64,
    pub unit: String,
}

/// One untyped name/value pair; values are always strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAttribute {
    pub name: String,
    pub value: String,
}

/// One product certification, renamed from the mapping document's
/// `authority`/`name`/`code`/`value` members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub certification_authority: String,
    pub certification_name: String,
    pub certification_code: String,
    pub certification_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_input() -> ProductInput {
        ProductInput {
            name: None,
            channel: CHANNEL_ONLINE.to_string(),
            offer_id: "8001_v1".to_string(),
            content_language: "en".to_string(),
            feed_label: "US".to_string(),
            attributes: Attributes {
                item_group_id: "8001".to_string(),
                title: "Tee".to_string(),
                description: "A tee.".to_string(),
                identifier_exists: false,
                price: Price {
                    amount_micros: "12990000".to_string(),
                    currency_code: "USD".to_string(),
                },
                ..Attributes::default()
            },
            custom_attributes: vec![],
        }
    }

    #[test]
    fn absent_name_is_omitted_not_null() {
        let json = serde_json::to_value(minimal_input()).unwrap();
        assert!(json.get("name").is_none());
    }

    #[test]
    fn empty_custom_attributes_are_omitted() {
        let json = serde_json::to_value(minimal_input()).unwrap();
        assert!(json.get("customAttributes").is_none());
    }

    #[test]
    fn unresolved_attributes_are_omitted() {
        let json = serde_json::to_value(minimal_input()).unwrap();
        let attributes = json.get("attributes").unwrap();
        assert!(attributes.get("brand").is_none());
        assert!(attributes.get("gtins").is_none());
        assert!(attributes.get("salePrice").is_none());
        assert!(attributes.get("customLabel0").is_none());
    }

    #[test]
    fn members_serialize_camel_case() {
        let mut input = minimal_input();
        input.name = Some("accounts/123/productInputs/ONLINE~en~US~8001_v1".to_string());
        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["offerId"], "8001_v1");
        assert_eq!(json["contentLanguage"], "en");
        assert_eq!(json["feedLabel"], "US");
        assert_eq!(json["attributes"]["itemGroupId"], "8001");
        assert_eq!(json["attributes"]["identifierExists"], false);
        assert_eq!(json["attributes"]["price"]["amountMicros"], "12990000");
        assert_eq!(json["attributes"]["price"]["currencyCode"], "USD");
    }

    #[test]
    fn certification_members_use_renamed_fields() {
        let certification = Certification {
            certification_authority: "EC".to_string(),
            certification_name: "EPREL".to_string(),
            certification_code: "123".to_string(),
            certification_value: String::new(),
        };
        let json = serde_json::to_value(certification).unwrap();
        assert_eq!(json["certificationAuthority"], "EC");
        assert_eq!(json["certificationName"], "EPREL");
        assert_eq!(json["certificationCode"], "123");
        assert_eq!(json["certificationValue"], "");
    }
}
