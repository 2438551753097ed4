//! Request extractors with API-shaped rejections.
//!
//! Axum's stock `Json` and `Path` extractors reject with plain-text bodies.
//! These wrappers reject with [`ApiError`] so every failure the client sees
//! has the same `{code, message}` shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};
use rolodex_core::ContactId;

use crate::error::ApiError;

/// JSON body extractor. Malformed bodies become `INVALID_INPUT` (400).
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Contact id taken from the `:id` path segment.
///
/// An id that does not parse cannot name a stored contact, so it is
/// rejected as `CONTACT_NOT_FOUND` (404) rather than a format error.
#[derive(Debug, Clone, Copy)]
pub struct ContactPathId(pub ContactId);

#[async_trait]
impl<S> FromRequestParts<S> for ContactPathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_input(format!("Missing contact id: {}", e)))?;

        raw.parse::<ContactId>().map(ContactPathId).map_err(|_| {
            tracing::debug!(path_param = %raw, "Unparseable contact id");
            ApiError::contact_not_found()
        })
    }
}
