//! Placeholder substitution for template-valued mapping fields.
//!
//! Templates are plain strings carrying `{{placeholder}}` markers. Rules:
//!
//! 1. Substitution is literal string replacement, not regex; the static
//!    table below fixes the recognized placeholder set and its order.
//! 2. Each placeholder is replaced at most once per call (first occurrence),
//!    matching the upstream authoring semantics merchants already rely on.
//! 3. A placeholder whose source value is missing substitutes the empty
//!    string.
//! 4. Unrecognized `{{...}}` markers pass through verbatim.

use mcfeed_core::{Product, ProductVariant, Shop};

/// Read-only view over the composite input that placeholder resolution
/// draws from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TemplateContext<'a> {
    pub shop: &'a Shop,
    pub product: &'a Product,
    pub variant: &'a ProductVariant,
    pub shop_id: &'a str,
}

/// The recognized placeholder names, in substitution order.
const PLACEHOLDERS: [&str; 16] = [
    "product_id",
    "variant_id",
    "product_title",
    "variant_title",
    "display_name",
    "seo_title",
    "seo_description",
    "description",
    "sku",
    "barcode",
    "shop_id",
    "price",
    "compare_at_price",
    "vendor",
    "store_name",
    "primary_domain",
];

impl TemplateContext<'_> {
    fn resolve(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "product_id" => Some(self.product.id.as_str()),
            "variant_id" => Some(self.variant.id.as_str()),
            "product_title" => self.product.title.as_deref(),
            "variant_title" => self.variant.title.as_deref(),
            "display_name" => self.variant.display_name.as_deref(),
            "seo_title" => self.product.seo_title(),
            "seo_description" => self.product.seo_description(),
            "description" => self.product.description.as_deref(),
            "sku" => self.variant.sku.as_deref(),
            "barcode" => self.variant.barcode.as_deref(),
            "shop_id" => Some(self.shop_id),
            "price" => self.variant.price.as_deref(),
            "compare_at_price" => self.variant.compare_at_price.as_deref(),
            "vendor" => self.product.vendor.as_deref(),
            "store_name" => self.shop.shop_name.as_deref(),
            "primary_domain" => self.shop.domain.as_deref(),
            _ => None,
        }
    }
}

/// Renders `template`, substituting each recognized placeholder at most
/// once. Missing source values become empty strings; unknown markers are
/// left verbatim.
#[must_use]
pub(crate) fn render(template: &str, ctx: &TemplateContext<'_>) -> String {
    // Fast path: no marker, no allocation churn.
    if !template.contains("{{") {
        return template.to_string();
    }

    let mut out = template.to_string();
    for placeholder in PLACEHOLDERS {
        let marker = format!("{{{{{placeholder}}}}}");
        if out.contains(&marker) {
            let value = ctx.resolve(placeholder).unwrap_or_default();
            out = out.replacen(&marker, value, 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcfeed_core::Seo;

    fn make_shop() -> Shop {
        Shop {
            shop_name: Some("Acme Outfitters".to_string()),
            domain: Some("shop.acme.com".to_string()),
        }
    }

    fn make_product() -> Product {
        Product {
            id: "8001".to_string(),
            title: Some("Shirt".to_string()),
            description: Some("A soft shirt.".to_string()),
            vendor: Some("Acme".to_string()),
            handle: Some("shirt".to_string()),
            product_type: Some("Shirts".to_string()),
            category: None,
            collections: vec![],
            tags: vec![],
            seo: Some(Seo {
                title: Some("Buy the Shirt".to_string()),
                description: None,
            }),
        }
    }

    fn make_variant() -> ProductVariant {
        ProductVariant {
            id: "v1".to_string(),
            title: Some("Small".to_string()),
            display_name: Some("Shirt - Small".to_string()),
            sku: Some("S1".to_string()),
            barcode: Some("0123456789012".to_string()),
            price: Some("19.99".to_string()),
            compare_at_price: None,
        }
    }

    fn render_with_defaults(template: &str) -> String {
        let shop = make_shop();
        let product = make_product();
        let variant = make_variant();
        let ctx = TemplateContext {
            shop: &shop,
            product: &product,
            variant: &variant,
            shop_id: "shop-1",
        };
        render(template, &ctx)
    }

    #[test]
    fn substitutes_multiple_placeholders() {
        assert_eq!(
            render_with_defaults("{{product_title}} - {{sku}}"),
            "Shirt - S1"
        );
    }

    #[test]
    fn missing_source_substitutes_empty_string() {
        assert_eq!(
            render_with_defaults("sale:{{compare_at_price}}!"),
            "sale:!"
        );
    }

    #[test]
    fn unknown_placeholder_passes_through() {
        assert_eq!(
            render_with_defaults("{{unknown}} {{product_id}}"),
            "{{unknown}} 8001"
        );
    }

    #[test]
    fn placeholder_replaced_once_per_call() {
        // Only the first occurrence is substituted.
        assert_eq!(render_with_defaults("{{sku}}/{{sku}}"), "S1/{{sku}}");
    }

    #[test]
    fn seo_fields_resolve_through_product() {
        assert_eq!(render_with_defaults("{{seo_title}}"), "Buy the Shirt");
        // seo.description is null; empty substitution.
        assert_eq!(render_with_defaults("[{{seo_description}}]"), "[]");
    }

    #[test]
    fn shop_placeholders_resolve() {
        assert_eq!(
            render_with_defaults("{{store_name}}|{{primary_domain}}|{{shop_id}}"),
            "Acme Outfitters|shop.acme.com|shop-1"
        );
    }

    #[test]
    fn template_without_markers_is_returned_verbatim() {
        assert_eq!(render_with_defaults("plain title"), "plain title");
    }
}
