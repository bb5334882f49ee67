//! The field resolver: composite catalog input → one [`ProductInput`].
//!
//! Every field group follows the same resolution policy:
//!
//! 1. start from a group-specific DEFAULT pulled from feed/product/variant;
//! 2. a present `field_mapping.<group>.<field>` override replaces it, as a
//!    literal value or (for template positions) a template string;
//! 3. template strings get placeholder substitution ([`crate::template`]);
//! 4. group-specific formatting runs (micros, case normalization, list
//!    shaping) and the value attaches only when non-empty.
//!
//! Missing optional data is never an error; malformed override values are
//! dropped with a `tracing` warning. The only error path is a feed missing
//! one of the fields every submission requires (currency, language, market).

use chrono::{DateTime, Utc};
use serde_json::Value;

use mcfeed_core::{
    AdditionalDetailsMapping, ApparelMapping, BrandSource, Feed, FeedProductVariant, FieldMapping,
    LabelsMapping, LinkSource, LinksMapping, PriceMapping, PriceSource, Product,
    ProductDetailsMapping, ProductIdentifier, ProductImagesMapping, ProductTypeSource,
    ProductVariant, ShippingMapping, Shop,
};

use crate::error::TransformError;
use crate::money::price_to_micros;
use crate::product_input::{
    Attributes, Certification, CustomAttribute, MeasureAttribute, Price, ProductInput,
    CHANNEL_ONLINE,
};
use crate::template::{render, TemplateContext};
use crate::tracking::{append_params, encode_click_token, CLICK_TOKEN_PARAM};

/// Default offer-id template when the feed configures none.
const DEFAULT_OFFER_ID_TEMPLATE: &str = "{{product_id}}_{{variant_id}}";
/// Default title/description templates when the feed configures none.
const DEFAULT_TITLE_TEMPLATE: &str = "{{product_title}}";
const DEFAULT_DESCRIPTION_TEMPLATE: &str = "{{description}}";
/// Default identifier templates.
const DEFAULT_GTIN_TEMPLATE: &str = "{{barcode}}";
const DEFAULT_MPN_TEMPLATE: &str = "{{sku}}";

/// Custom-attribute name carrying joined return-policy labels.
const RETURN_POLICY_LABEL_ATTR: &str = "return_policy_label";

/// The composite input for one transform invocation, assembled by the
/// caller from the upstream catalog/feed providers.
#[derive(Debug, Clone, Copy)]
pub struct TransformInput<'a> {
    pub shop: &'a Shop,
    pub feed: &'a Feed,
    pub product: &'a Product,
    pub variant: &'a ProductVariant,
    pub feed_variant: &'a FeedProductVariant,
    /// Main image URL, resolved upstream.
    pub main_image: Option<&'a str>,
}

/// Transforms one composite input into a normalized [`ProductInput`],
/// reading the wall clock once for the embedded click token.
///
/// # Errors
///
/// Returns [`TransformError::MissingFeedField`] when the feed's currency,
/// language, or market is empty; those are preconditions of every
/// submission, not recoverable input variation.
pub fn transform(input: &TransformInput<'_>) -> Result<ProductInput, TransformError> {
    transform_at(input, Utc::now())
}

/// [`transform`] with an explicit clock; output is byte-stable for a fixed
/// `now`.
///
/// # Errors
///
/// Same as [`transform`].
pub fn transform_at(
    input: &TransformInput<'_>,
    now: DateTime<Utc>,
) -> Result<ProductInput, TransformError> {
    let feed = input.feed;
    let content_language = require_feed_field(feed, "language", &feed.language)?.to_lowercase();
    let feed_label = require_feed_field(feed, "market", &feed.market)?.to_uppercase();
    let currency_code = require_feed_field(feed, "currency", &feed.currency)?.to_uppercase();

    let ctx = TemplateContext {
        shop: input.shop,
        product: input.product,
        variant: input.variant,
        shop_id: &feed.shop_id,
    };

    let mapping = input.feed_variant.field_mapping.as_ref();
    let details = group(mapping, |m| m.product_details.as_ref());
    let links = group(mapping, |m| m.links.as_ref());
    let images = group(mapping, |m| m.product_images.as_ref());
    let pricing = group(mapping, |m| m.price_condition_availability.as_ref());
    let labels = group(mapping, |m| m.labels.as_ref());
    let apparel = group(mapping, |m| m.apparel_product_details.as_ref());
    let additional = group(mapping, |m| m.additional_details.as_ref());
    let shipping = group(mapping, |m| m.shipping_and_returns.as_ref());

    let offer_id = resolve_offer_id(input, &ctx);
    let identifier_exists = details.and_then(|d| d.identifier_exists).unwrap_or(false);

    let mut attributes = Attributes {
        item_group_id: resolve_item_group_id(details, input.feed_variant, &ctx),
        title: resolve_title(details, feed, &ctx),
        description: resolve_description(details, feed, &ctx),
        brand: resolve_brand(details, feed, input.shop, input.product),
        identifier_exists,
        gtins: resolve_gtins(details, feed, identifier_exists, &ctx),
        mpn: resolve_mpn(details, feed, identifier_exists, &ctx),
        link: resolve_link(links, input, now),
        canonical_link: resolve_canonical_link(input.shop, input.product),
        image_link: resolve_image_link(images, input.main_image),
        additional_image_links: resolve_additional_image_links(images),
        price: resolve_price(pricing, input.variant, &currency_code),
        sale_price: resolve_sale_price(pricing, feed, input.variant, &currency_code),
        sale_price_effective_date: resolve_sale_price_effective_date(pricing),
        auto_pricing_min_price: resolve_price_override(
            pricing.and_then(|p| p.auto_pricing_min_price.as_deref()),
            &currency_code,
            "auto_pricing_min_price",
        ),
        maximum_retail_price: resolve_price_override(
            pricing.and_then(|p| p.maximum_retail_price.as_deref()),
            &currency_code,
            "maximum_retail_price",
        ),
        condition: resolve_condition(pricing),
        availability: resolve_availability(pricing, feed),
        product_types: resolve_product_types(pricing, input.product),
        google_product_category: resolve_google_product_category(pricing, feed),
        ..Attributes::default()
    };
    apply_labels(labels, &ctx, &mut attributes);
    apply_apparel(apparel, &mut attributes);
    apply_additional_details(additional, &mut attributes);
    apply_shipping(shipping, &mut attributes);

    let name = input.feed.account_id().map(|account_id| {
        format!(
            "accounts/{account_id}/productInputs/{CHANNEL_ONLINE}~{content_language}~{feed_label}~{offer_id}"
        )
    });

    Ok(ProductInput {
        name,
        channel: CHANNEL_ONLINE.to_string(),
        offer_id,
        content_language,
        feed_label,
        attributes,
        custom_attributes: build_custom_attributes(shipping, mapping),
    })
}

// ---------------------------------------------------------------------------
// Identity fields
// ---------------------------------------------------------------------------

fn require_feed_field<'a>(
    feed: &Feed,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, TransformError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransformError::MissingFeedField {
            feed_id: feed.id.clone(),
            field,
        });
    }
    Ok(trimmed)
}

/// Offer id: variant-metadata hard override → feed offer-id template →
/// `{{product_id}}_{{variant_id}}`.
fn resolve_offer_id(input: &TransformInput<'_>, ctx: &TemplateContext<'_>) -> String {
    let hard_override = input
        .feed_variant
        .metadata
        .as_ref()
        .and_then(|m| m.google_merchant_center.as_ref())
        .and_then(|gmc| gmc.offer_id.as_deref())
        .filter(|id| !id.trim().is_empty());
    if let Some(offer_id) = hard_override {
        return offer_id.to_string();
    }
    let template = input
        .feed
        .product_settings
        .offer_id
        .as_deref()
        .unwrap_or(DEFAULT_OFFER_ID_TEMPLATE);
    render(template, ctx)
}

// ---------------------------------------------------------------------------
// product_details
// ---------------------------------------------------------------------------

fn resolve_item_group_id(
    details: Option<&ProductDetailsMapping>,
    feed_variant: &FeedProductVariant,
    ctx: &TemplateContext<'_>,
) -> String {
    details
        .and_then(|d| d.item_group_id.as_deref())
        .map_or_else(
            || feed_variant.product_id.clone(),
            |template| render(template, ctx),
        )
}

fn resolve_title(
    details: Option<&ProductDetailsMapping>,
    feed: &Feed,
    ctx: &TemplateContext<'_>,
) -> String {
    // The override replaces the feed's whole template before substitution.
    let template = details
        .and_then(|d| d.title.as_deref())
        .or(feed.product_settings.title.as_deref())
        .unwrap_or(DEFAULT_TITLE_TEMPLATE);
    render(template, ctx)
}

fn resolve_description(
    details: Option<&ProductDetailsMapping>,
    feed: &Feed,
    ctx: &TemplateContext<'_>,
) -> String {
    let template = details
        .and_then(|d| d.description.as_deref())
        .or(feed.product_settings.description.as_deref())
        .unwrap_or(DEFAULT_DESCRIPTION_TEMPLATE);
    render(template, ctx)
}

/// Brand is selector-driven, not a template: the selector picks which shop
/// or product field is read. No selector at either level means no brand.
fn resolve_brand(
    details: Option<&ProductDetailsMapping>,
    feed: &Feed,
    shop: &Shop,
    product: &Product,
) -> Option<String> {
    let source = details
        .and_then(|d| d.brand)
        .or(feed.product_settings.brand_submission)?;
    let value = match source {
        BrandSource::Vendor => product.vendor.as_deref(),
        BrandSource::StoreName => shop.shop_name.as_deref(),
        BrandSource::PrimaryDomain => shop.domain.as_deref(),
    };
    non_empty(value)
}

fn resolve_gtins(
    details: Option<&ProductDetailsMapping>,
    feed: &Feed,
    identifier_exists: bool,
    ctx: &TemplateContext<'_>,
) -> Option<Vec<String>> {
    if !identifier_exists
        || feed.product_settings.product_identifier != Some(ProductIdentifier::Gtin)
    {
        return None;
    }
    let template = details
        .and_then(|d| d.gtin.as_deref())
        .unwrap_or(DEFAULT_GTIN_TEMPLATE);
    let gtin = render(template, ctx);
    non_empty(Some(&gtin)).map(|value| vec![value])
}

fn resolve_mpn(
    details: Option<&ProductDetailsMapping>,
    feed: &Feed,
    identifier_exists: bool,
    ctx: &TemplateContext<'_>,
) -> Option<String> {
    if !identifier_exists
        || feed.product_settings.product_identifier != Some(ProductIdentifier::Mpn)
    {
        return None;
    }
    let template = details
        .and_then(|d| d.mpn.as_deref())
        .unwrap_or(DEFAULT_MPN_TEMPLATE);
    non_empty(Some(&render(template, ctx)))
}

// ---------------------------------------------------------------------------
// links
// ---------------------------------------------------------------------------

/// Builds the decorated product link: base shape per the link-source
/// selector, `https://` prefix, UTM parameters, then the click token.
fn resolve_link(
    links: Option<&LinksMapping>,
    input: &TransformInput<'_>,
    now: DateTime<Utc>,
) -> Option<String> {
    let domain = non_empty(input.shop.domain.as_deref())?;
    let source = links
        .and_then(|l| l.link_source)
        .unwrap_or(LinkSource::ProductUrl);

    let base = match source {
        LinkSource::ProductCheckoutUrl => {
            format!("{domain}/cart/{}:1?storefront=true", input.variant.id)
        }
        // `canonical_url` falls through to the default product shape; the
        // upstream switch had no distinct arm for it.
        LinkSource::ProductUrl | LinkSource::CanonicalUrl => {
            let handle = non_empty(input.product.handle.as_deref())?;
            format!("{domain}/products/{handle}?variant={}", input.variant.id)
        }
    };

    let mut params: Vec<(String, String)> = Vec::with_capacity(4);
    push_utm_param(
        &mut params,
        "utm_source",
        links.and_then(|l| l.utm_source.as_deref()),
        input.feed.tracking.utm_source.as_deref(),
    );
    push_utm_param(
        &mut params,
        "utm_medium",
        links.and_then(|l| l.utm_medium.as_deref()),
        input.feed.tracking.utm_medium.as_deref(),
    );
    push_utm_param(
        &mut params,
        "utm_campaign",
        links.and_then(|l| l.utm_campaign.as_deref()),
        input.feed.tracking.utm_campaign.as_deref(),
    );
    params.push((
        CLICK_TOKEN_PARAM.to_string(),
        encode_click_token(&input.feed.id, &input.feed.shop_id, now),
    ));

    Some(append_params(&format!("https://{base}"), &params))
}

/// Override wins per-parameter, not per-group; empty values are skipped.
fn push_utm_param(
    params: &mut Vec<(String, String)>,
    name: &str,
    override_value: Option<&str>,
    feed_value: Option<&str>,
) {
    if let Some(value) = non_empty(override_value).or_else(|| non_empty(feed_value)) {
        params.push((name.to_string(), value));
    }
}

/// Canonical link never carries the `?variant=` parameter the default
/// product link has. The asymmetry is upstream behavior, preserved as-is.
fn resolve_canonical_link(shop: &Shop, product: &Product) -> Option<String> {
    let domain = non_empty(shop.domain.as_deref())?;
    let handle = non_empty(product.handle.as_deref())?;
    Some(format!("https://{domain}/products/{handle}"))
}

// ---------------------------------------------------------------------------
// product_images
// ---------------------------------------------------------------------------

fn resolve_image_link(
    images: Option<&ProductImagesMapping>,
    main_image: Option<&str>,
) -> Option<String> {
    // Override is a literal URL, not a template.
    non_empty(images.and_then(|i| i.image_link.as_deref()))
        .or_else(|| non_empty(main_image))
}

fn resolve_additional_image_links(images: Option<&ProductImagesMapping>) -> Option<Vec<String>> {
    images
        .and_then(|i| i.additional_image_links.clone())
        .filter(|links| !links.is_empty())
}

// ---------------------------------------------------------------------------
// price_condition_availability
// ---------------------------------------------------------------------------

fn select_variant_price<'a>(variant: &'a ProductVariant, source: PriceSource) -> Option<&'a str> {
    match source {
        PriceSource::Price => variant.price.as_deref(),
        PriceSource::CompareAtPrice => variant.compare_at_price.as_deref(),
    }
}

/// Base price is a required attribute: an unpriceable source degrades to
/// zero micros rather than omission or failure.
fn resolve_price(
    pricing: Option<&PriceMapping>,
    variant: &ProductVariant,
    currency_code: &str,
) -> Price {
    let source = pricing
        .and_then(|p| p.price_type)
        .unwrap_or(PriceSource::Price);
    let amount_micros = select_variant_price(variant, source)
        .and_then(price_to_micros)
        .unwrap_or_else(|| {
            tracing::warn!(
                variant_id = %variant.id,
                ?source,
                "variant has no parsable price for the selected source; submitting zero"
            );
            "0".to_string()
        });
    Price {
        amount_micros,
        currency_code: currency_code.to_string(),
    }
}

/// Sale price is double-gated: the feed-level toggle AND the per-variant
/// mapping's own toggle must both be enabled.
fn resolve_sale_price(
    pricing: Option<&PriceMapping>,
    feed: &Feed,
    variant: &ProductVariant,
    currency_code: &str,
) -> Option<Price> {
    let pricing = pricing?;
    if !feed.product_settings.enable_sale_price || pricing.enable_sale_price != Some(true) {
        return None;
    }
    let source = pricing.sale_price_type.unwrap_or(PriceSource::Price);
    let amount_micros = select_variant_price(variant, source).and_then(price_to_micros)?;
    Some(Price {
        amount_micros,
        currency_code: currency_code.to_string(),
    })
}

/// Window bounds come verbatim from the override, joined `start/end`; there
/// are no default dates.
fn resolve_sale_price_effective_date(pricing: Option<&PriceMapping>) -> Option<String> {
    let pricing = pricing?;
    let start = non_empty(pricing.sale_start_date.as_deref())?;
    let end = non_empty(pricing.sale_end_date.as_deref())?;
    Some(format!("{start}/{end}"))
}

/// Override-only decimal prices (auto-pricing minimum, maximum retail).
/// Invalid numeric strings are dropped, not surfaced.
fn resolve_price_override(
    value: Option<&str>,
    currency_code: &str,
    field: &'static str,
) -> Option<Price> {
    let value = non_empty(value)?;
    match price_to_micros(&value) {
        Some(amount_micros) => Some(Price {
            amount_micros,
            currency_code: currency_code.to_string(),
        }),
        None => {
            tracing::warn!(field, value = %value, "dropping unparsable price override");
            None
        }
    }
}

fn resolve_condition(pricing: Option<&PriceMapping>) -> Option<String> {
    // Literal override only; no default.
    non_empty(pricing.and_then(|p| p.condition.as_deref()))
}

fn resolve_availability(pricing: Option<&PriceMapping>, feed: &Feed) -> Option<String> {
    if let Some(value) = non_empty(pricing.and_then(|p| p.availability.as_deref())) {
        return Some(value);
    }
    let inventory = feed.inventory.as_ref()?;
    if inventory.kind == "custom" {
        non_empty(inventory.custom_setting.as_deref())
    } else {
        non_empty(Some(&inventory.kind))
    }
}

/// Product types are selector-driven like brand; collections and tags can
/// yield multiple entries, the other sources at most one.
fn resolve_product_types(
    pricing: Option<&PriceMapping>,
    product: &Product,
) -> Option<Vec<String>> {
    let source = pricing
        .and_then(|p| p.product_type_source)
        .unwrap_or(ProductTypeSource::ProductType);
    let values: Vec<String> = match source {
        ProductTypeSource::ProductType => product.product_type.iter().cloned().collect(),
        ProductTypeSource::CategoryName => product
            .category
            .as_ref()
            .and_then(|c| c.name.clone())
            .into_iter()
            .collect(),
        ProductTypeSource::CategoryFullname => product
            .category
            .as_ref()
            .and_then(|c| c.full_name.clone())
            .into_iter()
            .collect(),
        ProductTypeSource::Collections => {
            product.collections.iter().map(|c| c.title.clone()).collect()
        }
        ProductTypeSource::Tags => product.tags.clone(),
    };
    let values: Vec<String> = values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn resolve_google_product_category(pricing: Option<&PriceMapping>, feed: &Feed) -> Option<String> {
    non_empty(pricing.and_then(|p| p.google_product_category.as_deref()))
        .or_else(|| feed.category_id().map(|id| id.to_string()))
}

// ---------------------------------------------------------------------------
// labels, apparel, additional details, shipping
// ---------------------------------------------------------------------------

fn apply_labels(
    labels: Option<&LabelsMapping>,
    ctx: &TemplateContext<'_>,
    attributes: &mut Attributes,
) {
    let Some(labels) = labels else { return };
    let rendered = |value: &Option<String>| {
        value
            .as_deref()
            .map(|template| render(template, ctx))
            .and_then(|label| non_empty(Some(&label)))
    };
    attributes.custom_label_0 = rendered(&labels.custom_label_0);
    attributes.custom_label_1 = rendered(&labels.custom_label_1);
    attributes.custom_label_2 = rendered(&labels.custom_label_2);
    attributes.custom_label_3 = rendered(&labels.custom_label_3);
    attributes.custom_label_4 = rendered(&labels.custom_label_4);
}

/// Apparel fields are literal, override-only; the whole group is skipped
/// when the mapping carries no `apparel_product_details` object.
fn apply_apparel(apparel: Option<&ApparelMapping>, attributes: &mut Attributes) {
    let Some(apparel) = apparel else { return };
    attributes.gender = non_empty(apparel.gender.as_deref());
    attributes.age_group = non_empty(apparel.age_group.as_deref());
    attributes.size = non_empty(apparel.size.as_deref());
    attributes.size_type = non_empty(apparel.size_type.as_deref());
    attributes.size_system = non_empty(apparel.size_system.as_deref());
    attributes.color = non_empty(apparel.color.as_deref());
    attributes.material = non_empty(apparel.material.as_deref());
    attributes.pattern = non_empty(apparel.pattern.as_deref());
}

fn apply_additional_details(
    additional: Option<&AdditionalDetailsMapping>,
    attributes: &mut Attributes,
) {
    let Some(additional) = additional else { return };
    attributes.adult = additional.adult;
    attributes.is_bundle = additional.is_bundle;
    attributes.multipack = additional.multipack;
    attributes.energy_efficiency_class = non_empty(additional.energy_efficiency_class.as_deref());
    attributes.min_energy_efficiency_class =
        non_empty(additional.min_energy_efficiency_class.as_deref());
    attributes.max_energy_efficiency_class =
        non_empty(additional.max_energy_efficiency_class.as_deref());
    attributes.product_highlights = additional
        .product_highlights
        .clone()
        .filter(|highlights| !highlights.is_empty());
    attributes.certifications = additional.certifications.as_ref().and_then(|entries| {
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .iter()
                .map(|entry| Certification {
                    certification_authority: entry.authority.clone().unwrap_or_default(),
                    certification_name: entry.name.clone().unwrap_or_default(),
                    certification_code: entry.code.clone().unwrap_or_default(),
                    certification_value: entry.value.clone().unwrap_or_default(),
                })
                .collect(),
        )
    });
}

fn apply_shipping(shipping: Option<&ShippingMapping>, attributes: &mut Attributes) {
    let Some(shipping) = shipping else { return };
    let measure = |value: &Option<mcfeed_core::Measure>| {
        value.as_ref().map(|m| MeasureAttribute {
            value: m.value,
            unit: m.unit.clone(),
        })
    };
    attributes.shipping_label = non_empty(shipping.shipping_label.as_deref());
    attributes.shipping_weight = measure(&shipping.shipping_weight);
    attributes.shipping_length = measure(&shipping.shipping_length);
    attributes.shipping_width = measure(&shipping.shipping_width);
    attributes.shipping_height = measure(&shipping.shipping_height);
    attributes.min_transit_time = shipping.min_transit_time;
    attributes.max_transit_time = shipping.max_transit_time;
    attributes.min_handling_time = shipping.min_handling_time;
    attributes.max_handling_time = shipping.max_handling_time;
}

// ---------------------------------------------------------------------------
// Custom attributes
// ---------------------------------------------------------------------------

/// Ordered accumulation: the joined return-policy labels first, then the
/// `additional_product_attributes` entries in document order. Names are not
/// de-duplicated.
fn build_custom_attributes(
    shipping: Option<&ShippingMapping>,
    mapping: Option<&FieldMapping>,
) -> Vec<CustomAttribute> {
    let mut custom = Vec::new();

    if let Some(labels) = shipping.and_then(|s| s.return_policy_labels.as_ref()) {
        if !labels.is_empty() {
            custom.push(CustomAttribute {
                name: RETURN_POLICY_LABEL_ATTR.to_string(),
                value: labels.join(","),
            });
        }
    }

    if let Some(extra) = mapping.and_then(|m| m.additional_product_attributes.as_ref()) {
        for (name, value) in extra {
            match coerce_attribute_value(value) {
                Some(value) => custom.push(CustomAttribute {
                    name: name.clone(),
                    value,
                }),
                None => {
                    tracing::debug!(name = %name, "skipping non-scalar custom attribute value");
                }
            }
        }
    }

    custom
}

/// Custom-attribute values are always strings on the wire: scalars
/// stringify, lists join their coerced elements with `,`, and anything else
/// (null, nested objects) is skipped.
fn coerce_attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(coerce_attribute_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------

fn group<'a, T>(
    mapping: Option<&'a FieldMapping>,
    select: impl FnOnce(&'a FieldMapping) -> Option<&'a T>,
) -> Option<&'a T> {
    mapping.and_then(select)
}

/// Trims and filters the empty string; the uniform "attach only if
/// non-empty" rule.
fn non_empty<S: AsRef<str>>(value: Option<S>) -> Option<String> {
    value
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
