use thiserror::Error;

/// Errors from the transformation core.
///
/// Only precondition violations surface as errors: fields the transform
/// assumes present on every feed (currency, language, market). Everything
/// else — absent optional data, malformed override values — degrades to a
/// default or to omission so that partial per-variant configuration never
/// blocks a catalog submission.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("feed {feed_id} is missing required field \"{field}\"")]
    MissingFeedField { feed_id: String, field: &'static str },
}
