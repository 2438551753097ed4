//! Liveness endpoint.
//!
//! `GET /` answers with plain text so load balancers and humans with curl
//! can tell the process is up. No store access.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

pub const LIVENESS_TEXT: &str = "Server is running";

/// GET / - Liveness check
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is responding", body = String),
    ),
))]
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_TEXT)
}

pub fn create_router() -> Router {
    Router::new().route("/", get(liveness))
}
