//! OpenAPI Specification for the Rolodex API
//!
//! Generated by utoipa from the route annotations and schema derives.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{contacts, health};
use crate::types::MessageResponse;
use rolodex_core::{Contact, ContactFields, ContactId};

/// OpenAPI document for the Rolodex API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rolodex API",
        version = "0.1.0",
        description = "Contact management REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    tags(
        (name = "Contacts", description = "Create, list, update and delete contacts"),
        (name = "Health", description = "Liveness")
    ),
    paths(
        contacts::create_contact,
        contacts::list_contacts,
        contacts::update_contact,
        contacts::delete_contact,
        health::liveness,
    ),
    components(
        schemas(
            Contact,
            ContactFields,
            ContactId,
            MessageResponse,
            ApiError,
            ErrorCode,
        )
    )
)]
pub struct ApiDoc;
