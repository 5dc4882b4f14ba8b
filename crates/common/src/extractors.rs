//! Custom axum extractors for Tasklane

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{Error, Result};

/// JSON extractor whose rejections use the common error envelope.
///
/// Malformed bodies, wrong content types, and shape mismatches all
/// return 400 `VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| Error::Validation(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// Run `validator` rules on an already-deserialized input.
pub fn validate_input<T: Validate>(input: &T) -> Result<()> {
    input
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))
}
