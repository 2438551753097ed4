//! Request and response bodies for the contact endpoints.

use serde::{Deserialize, Serialize};

pub use rolodex_core::{Contact, ContactFields, ContactId};

/// Body of `POST /api/contacts`.
pub type CreateContactRequest = ContactFields;

/// Body of `PUT /api/contacts/:id`. Every mutable field is replaced.
pub type UpdateContactRequest = ContactFields;

/// Plain confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Confirmation returned by `DELETE /api/contacts/:id`.
    pub fn contact_deleted() -> Self {
        Self::new("Contact deleted successfully")
    }
}
