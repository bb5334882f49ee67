//! Catalog entities as exported by the merchant platform.
//!
//! ## Observed upstream shapes
//!
//! ### Prices
//! Variant prices arrive as decimal strings exactly as the platform serves
//! them, e.g. `"12.99"`. `compare_at_price` is `null` when no sale is
//! configured (not omitted, not `"0.00"`); both are modeled as
//! `Option<String>` and parsed only at micros-conversion time.
//!
//! ### `handle` and `domain`
//! The URL slug and the storefront domain can each be absent on draft or
//! partially-configured stores. Link construction skips rather than emitting
//! half-built URLs.
//!
//! ### SEO
//! The `seo` object is `null` when the merchant never edited search-listing
//! fields; when present, both members may still be `null` individually.

use serde::{Deserialize, Serialize};

/// Store identity, resolved once per shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    /// Display name of the store (e.g., `"Acme Outfitters"`).
    pub shop_name: Option<String>,
    /// Primary storefront domain without scheme (e.g., `"shop.acme.com"`).
    pub domain: Option<String>,
}

/// A catalog product as exported from the merchant platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Platform product ID, stored as a string to avoid precision loss.
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Brand/manufacturer name as entered by the merchant.
    pub vendor: Option<String>,
    /// URL slug, e.g. `"organic-cotton-tee"`.
    pub handle: Option<String>,
    pub product_type: Option<String>,
    /// Platform taxonomy category, when assigned.
    pub category: Option<ProductCategory>,
    /// Collections the product belongs to, in platform order.
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Search-listing overrides; `null` when never edited.
    pub seo: Option<Seo>,
}

/// Platform taxonomy category assigned to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Leaf name, e.g. `"T-Shirts"`.
    pub name: Option<String>,
    /// Full path, e.g. `"Apparel & Accessories > Clothing > Shirts & Tops"`.
    pub full_name: Option<String>,
}

/// A collection membership; only the title is relevant for feed submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub title: String,
}

/// Merchant-edited search listing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A sellable unit of a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Platform variant ID, stored as a string to avoid precision loss.
    pub id: String,
    /// Variant option title, e.g. `"Small / Navy"`.
    pub title: Option<String>,
    /// Combined product + variant display name, e.g.
    /// `"Organic Cotton Tee - Small / Navy"`.
    pub display_name: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    /// Price as a decimal string, exactly as the platform returns it.
    pub price: Option<String>,
    /// Pre-sale comparison price, if set.
    pub compare_at_price: Option<String>,
}

impl Product {
    /// Returns the SEO title when present and non-empty.
    #[must_use]
    pub fn seo_title(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|seo| seo.title.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Returns the SEO description when present and non-empty.
    #[must_use]
    pub fn seo_description(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|seo| seo.description.as_deref())
            .filter(|s| !s.is_empty())
    }
}
