//! Per-variant field-mapping override document.
//!
//! The mapping document is authored per variant and controls, group by
//! group, which source field or template feeds each output attribute. Every
//! group is optional; an absent group means "use the defaults" for its
//! fields. String fields in template positions (titles, identifiers, custom
//! labels) accept `{{placeholder}}` syntax; the transformer substitutes the
//! recognized placeholders and leaves unknown ones verbatim.
//!
//! Selector fields are modeled as enums rather than free-form strings so
//! each dispatch over them is exhaustiveness-checked.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Join entity between a feed and one product variant, carrying that
/// variant's override configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedProductVariant {
    pub product_id: String,
    pub variant_id: String,
    /// Per-variant override document; `None` means all-defaults.
    pub field_mapping: Option<FieldMapping>,
    pub metadata: Option<VariantMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantMetadata {
    pub google_merchant_center: Option<VariantMerchantCenter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantMerchantCenter {
    /// Hard override of the computed offer id, bypassing the feed's
    /// offer-id template entirely.
    pub offer_id: Option<String>,
}

/// The override document itself, one optional sub-object per field group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldMapping {
    pub product_details: Option<ProductDetailsMapping>,
    pub links: Option<LinksMapping>,
    pub product_images: Option<ProductImagesMapping>,
    pub price_condition_availability: Option<PriceMapping>,
    pub labels: Option<LabelsMapping>,
    pub apparel_product_details: Option<ApparelMapping>,
    pub additional_details: Option<AdditionalDetailsMapping>,
    pub shipping_and_returns: Option<ShippingMapping>,
    /// Arbitrary name → value entries, each emitted as one custom
    /// attribute. Insertion order is preserved (`serde_json` with
    /// `preserve_order`); list values are joined with `,`.
    pub additional_product_attributes: Option<Map<String, Value>>,
}

/// Overrides for identity and core listing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDetailsMapping {
    /// Template replacing the default item-group id.
    pub item_group_id: Option<String>,
    /// Template replacing the feed's title template.
    pub title: Option<String>,
    /// Template replacing the feed's description template.
    pub description: Option<String>,
    /// Source selector replacing the feed's `brand_submission`.
    pub brand: Option<BrandSource>,
    pub identifier_exists: Option<bool>,
    /// Template replacing the default `{{barcode}}` GTIN source.
    pub gtin: Option<String>,
    /// Template replacing the default `{{sku}}` MPN source.
    pub mpn: Option<String>,
}

/// Overrides for the outbound product link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksMapping {
    pub link_source: Option<LinkSource>,
    /// Per-parameter UTM overrides; each wins over the same-named feed
    /// tracking value individually.
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductImagesMapping {
    /// Literal URL replacing the caller-resolved main image.
    pub image_link: Option<String>,
    /// Wholesale replacement for the additional-image list.
    pub additional_image_links: Option<Vec<String>>,
}

/// Overrides for pricing, condition, availability, and categorization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceMapping {
    /// Which variant price field feeds the base price.
    pub price_type: Option<PriceSource>,
    /// Per-variant sale-price gate; must be `true` (in addition to the
    /// feed-level gate) for a sale price to be emitted.
    pub enable_sale_price: Option<bool>,
    pub sale_price_type: Option<PriceSource>,
    /// Sale window bounds, taken verbatim; no defaults.
    pub sale_start_date: Option<String>,
    pub sale_end_date: Option<String>,
    /// Decimal strings; unparsable values are dropped silently.
    pub auto_pricing_min_price: Option<String>,
    pub maximum_retail_price: Option<String>,
    pub condition: Option<String>,
    pub availability: Option<String>,
    pub product_type_source: Option<ProductTypeSource>,
    pub google_product_category: Option<String>,
}

/// Custom label overrides; each label is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelsMapping {
    pub custom_label_0: Option<String>,
    pub custom_label_1: Option<String>,
    pub custom_label_2: Option<String>,
    pub custom_label_3: Option<String>,
    pub custom_label_4: Option<String>,
}

/// Apparel attributes; override-only, no per-field defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApparelMapping {
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub size_type: Option<String>,
    pub size_system: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub pattern: Option<String>,
}

/// Miscellaneous listing attributes; override-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionalDetailsMapping {
    pub adult: Option<bool>,
    pub is_bundle: Option<bool>,
    pub multipack: Option<i64>,
    pub energy_efficiency_class: Option<String>,
    pub min_energy_efficiency_class: Option<String>,
    pub max_energy_efficiency_class: Option<String>,
    pub product_highlights: Option<Vec<String>>,
    pub certifications: Option<Vec<CertificationMapping>>,
}

/// One certification entry as authored in the mapping document. Field names
/// are renamed on output (`authority` → `certificationAuthority`, etc.) with
/// empty-string fallback per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationMapping {
    pub authority: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub value: Option<String>,
}

/// Shipping and returns attributes; override-only, each sub-field
/// independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingMapping {
    pub shipping_label: Option<String>,
    pub shipping_weight: Option<Measure>,
    pub shipping_length: Option<Measure>,
    pub shipping_width: Option<Measure>,
    pub shipping_height: Option<Measure>,
    pub min_transit_time: Option<i64>,
    pub max_transit_time: Option<i64>,
    pub min_handling_time: Option<i64>,
    pub max_handling_time: Option<i64>,
    /// Joined with `,` and emitted as one `return_policy_label` custom
    /// attribute, not as a typed attribute.
    pub return_policy_labels: Option<Vec<String>>,
}

/// A value + unit pair for shipping weight and dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub value: f64,
    pub unit: String,
}

/// Source field for the brand attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSource {
    Vendor,
    StoreName,
    PrimaryDomain,
}

/// Which unique product identifier the feed submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductIdentifier {
    Gtin,
    Mpn,
    None,
}

/// Shape selector for the outbound product link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    ProductUrl,
    ProductCheckoutUrl,
    CanonicalUrl,
}

/// Which variant price field feeds a price attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Price,
    CompareAtPrice,
}

/// Source for the `productTypes` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductTypeSource {
    ProductType,
    CategoryName,
    CategoryFullname,
    Collections,
    Tags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mapping_deserializes_empty_document() {
        let mapping: FieldMapping = serde_json::from_str("{}").unwrap();
        assert!(mapping.product_details.is_none());
        assert!(mapping.additional_product_attributes.is_none());
    }

    #[test]
    fn selector_enums_use_snake_case() {
        assert_eq!(
            serde_json::from_str::<BrandSource>(r#""store_name""#).unwrap(),
            BrandSource::StoreName
        );
        assert_eq!(
            serde_json::from_str::<LinkSource>(r#""product_checkout_url""#).unwrap(),
            LinkSource::ProductCheckoutUrl
        );
        assert_eq!(
            serde_json::from_str::<PriceSource>(r#""compare_at_price""#).unwrap(),
            PriceSource::CompareAtPrice
        );
        assert_eq!(
            serde_json::from_str::<ProductTypeSource>(r#""category_fullname""#).unwrap(),
            ProductTypeSource::CategoryFullname
        );
        assert_eq!(
            serde_json::from_str::<ProductIdentifier>(r#""none""#).unwrap(),
            ProductIdentifier::None
        );
    }

    #[test]
    fn additional_attributes_preserve_document_order() {
        let mapping: FieldMapping = serde_json::from_str(
            r#"{"additional_product_attributes":{"zeta":"1","alpha":"2","mid":"3"}}"#,
        )
        .unwrap();
        let keys: Vec<&String> = mapping
            .additional_product_attributes
            .as_ref()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn unknown_group_fields_are_tolerated() {
        // Mapping documents are caller-authored; stray members must not fail
        // deserialization of the groups we read.
        let mapping: FieldMapping = serde_json::from_str(
            r#"{"product_details":{"title":"{{product_title}}","unknown_member":true}}"#,
        )
        .unwrap();
        assert_eq!(
            mapping.product_details.unwrap().title.as_deref(),
            Some("{{product_title}}")
        );
    }

    #[test]
    fn feed_product_variant_roundtrips_metadata_offer_id() {
        let fpv: FeedProductVariant = serde_json::from_str(
            r#"{"product_id":"p1","variant_id":"v1","field_mapping":null,
                "metadata":{"google_merchant_center":{"offer_id":"custom-1"}}}"#,
        )
        .unwrap();
        let offer = fpv
            .metadata
            .and_then(|m| m.google_merchant_center)
            .and_then(|g| g.offer_id);
        assert_eq!(offer.as_deref(), Some("custom-1"));
    }
}
