//! Rolodex Core - Contact Types
//!
//! Data structures shared by the store, the HTTP service and the terminal
//! client. Validation of required fields lives here so every boundary applies
//! the same rules.

pub mod contact;
pub mod error;
pub mod identity;

pub use contact::{Contact, ContactField, ContactFields};
pub use error::{RolodexError, RolodexResult, StorageError, ValidationError};
pub use identity::{ContactId, ParseContactIdError};
