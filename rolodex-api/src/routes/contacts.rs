//! Contact REST API Routes
//!
//! This module implements Axum route handlers for contact operations.
//! All handlers go through the [`ContactService`].

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    error::ApiResult,
    extractors::{ApiJson, ContactPathId},
    service::ContactService,
    types::{ContactFields, MessageResponse},
};
#[cfg(feature = "openapi")]
use crate::{error::ApiError, types::Contact};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for contact routes.
#[derive(Clone)]
pub struct ContactState {
    pub service: ContactService,
}

impl ContactState {
    pub fn new(service: ContactService) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/contacts - Create a new contact
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = ContactFields,
    responses(
        (status = 201, description = "Contact created successfully", body = Contact),
        (status = 400, description = "Missing field, duplicate email or malformed body", body = ApiError),
    )
))]
pub async fn create_contact(
    State(state): State<Arc<ContactState>>,
    ApiJson(req): ApiJson<ContactFields>,
) -> ApiResult<impl IntoResponse> {
    let contact = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contacts - List every contact
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    responses(
        (status = 200, description = "All contacts, unordered", body = Vec<Contact>),
        (status = 500, description = "Store failure", body = ApiError),
    )
))]
pub async fn list_contacts(
    State(state): State<Arc<ContactState>>,
) -> ApiResult<impl IntoResponse> {
    let contacts = state.service.list().await?;
    Ok(Json(contacts))
}

/// PUT /api/contacts/:id - Replace a contact's fields
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(
        ("id" = String, Path, description = "Contact ID")
    ),
    request_body = ContactFields,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 400, description = "Missing field, duplicate email or malformed body", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError),
    )
))]
pub async fn update_contact(
    State(state): State<Arc<ContactState>>,
    ContactPathId(id): ContactPathId,
    ApiJson(req): ApiJson<ContactFields>,
) -> ApiResult<impl IntoResponse> {
    let contact = state.service.update(id, req).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/:id - Delete a contact
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(
        ("id" = String, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 404, description = "Contact not found", body = ApiError),
        (status = 500, description = "Store failure", body = ApiError),
    )
))]
pub async fn delete_contact(
    State(state): State<Arc<ContactState>>,
    ContactPathId(id): ContactPathId,
) -> ApiResult<impl IntoResponse> {
    state.service.delete(id).await?;
    Ok(Json(MessageResponse::contact_deleted()))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the contact routes router.
pub fn create_router(service: ContactService) -> axum::Router {
    let state = Arc::new(ContactState::new(service));

    axum::Router::new()
        .route("/", axum::routing::post(create_contact))
        .route("/", axum::routing::get(list_contacts))
        .route("/:id", axum::routing::put(update_contact))
        .route("/:id", axum::routing::delete(delete_contact))
        .with_state(state)
}
