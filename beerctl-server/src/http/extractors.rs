//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{Beer, ValidationError};

/// Extract a beer id from path, rejecting anything that is not an integer
pub struct BeerIdPath(pub i64);

impl<S> FromRequestParts<S> for BeerIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::invalid_format("id", e.body_text())))?;

        let id = raw.parse::<i64>().map_err(|e| {
            ApiError::Validation(ValidationError::invalid_format(
                "id",
                format!("'{}': {}", raw, e),
            ))
        })?;

        Ok(Self(id))
    }
}

/// Decode a beer from the request body.
///
/// The body is read as raw bytes, so a missing or unusual Content-Type is
/// accepted. Any decode failure is a 400.
pub struct BeerBody(pub Beer);

impl<S> FromRequest<S> for BeerBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::invalid_format("body", e.body_text())))?;

        let beer = serde_json::from_slice::<Beer>(&bytes)
            .map_err(|e| ApiError::Validation(ValidationError::invalid_format("body", e.to_string())))?;

        Ok(Self(beer))
    }
}
