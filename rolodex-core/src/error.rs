//! Error types for Rolodex operations

use crate::ContactId;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("duplicate key on index {index}: {value}")]
    DuplicateKey { index: String, value: String },

    #[error("Storage backend failure: {reason}")]
    Backend { reason: String },

    #[error("Document serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
///
/// Covers both a missing required field and an email that another contact
/// already uses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("duplicate email: a contact with email '{email}' already exists")]
    DuplicateEmail { email: String },
}

/// Master error type for all Rolodex errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RolodexError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Contact not found: {id}")]
    NotFound { id: ContactId },
}

/// Result type alias for Rolodex operations.
pub type RolodexResult<T> = Result<T, RolodexError>;
