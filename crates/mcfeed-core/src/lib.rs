//! Domain records for merchant-catalog feed submission.
//!
//! This crate holds the read-only input aggregate the transformer consumes:
//! the shop identity, the per-market feed configuration, the catalog product
//! and variant, and the per-variant [`FieldMapping`] override document. All
//! records are assembled by the caller from upstream systems and passed in
//! by reference; nothing here performs I/O.

pub mod catalog;
pub mod feed;
pub mod mapping;

pub use catalog::{Collection, Product, ProductCategory, ProductVariant, Seo, Shop};
pub use feed::{
    Feed, FeedMetadata, Inventory, MerchantAccount, MerchantCenterMetadata, ProductSettings,
    Tracking,
};
pub use mapping::{
    AdditionalDetailsMapping, ApparelMapping, BrandSource, CertificationMapping,
    FeedProductVariant, FieldMapping, LabelsMapping, LinkSource, LinksMapping, Measure,
    PriceMapping, PriceSource, ProductDetailsMapping, ProductIdentifier, ProductImagesMapping,
    ProductTypeSource, ShippingMapping, VariantMerchantCenter, VariantMetadata,
};
