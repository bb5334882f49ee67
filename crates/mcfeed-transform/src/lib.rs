//! Field resolution and transformation from catalog records to catalog-API
//! product inputs.
//!
//! The entry point is [`transform`]: given one composite input (shop, feed,
//! product, variant, per-variant mapping, resolved main image) it produces
//! one normalized [`ProductInput`] record, applying a uniform
//! default → override → template → format policy per field group. The
//! transform is pure apart from a single wall-clock read for the embedded
//! click token; [`transform_at`] takes the clock explicitly for
//! deterministic output.
//!
//! Network submission of the produced record (insert/patch, auth, retries)
//! is strictly downstream and not part of this crate.

pub mod error;
pub mod money;
pub mod product_input;
pub mod template;
pub mod tracking;
pub mod transform;

pub use error::TransformError;
pub use product_input::{Attributes, Certification, CustomAttribute, Price, ProductInput};
pub use tracking::{decode_click_token, ClickToken};
pub use transform::{transform, transform_at, TransformInput};
