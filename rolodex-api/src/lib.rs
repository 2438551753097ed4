//! Rolodex API - REST Layer
//!
//! Axum HTTP server exposing create, list, update and delete over the contact
//! store. Errors leave the service as `{code, message}` JSON bodies.

pub mod config;
pub mod error;
pub mod extractors;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod service;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, StoreBackend};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use service::ContactService;
pub use types::*;
