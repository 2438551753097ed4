//! Rolodex Storage - Contact Store
//!
//! Defines the persistence boundary for contacts. Two implementations ship
//! here: an in-memory store used by tests and `ROLODEX_STORE=memory`, and an
//! LMDB document store used in production.
//!
//! Both enforce the unique-email constraint themselves. The uniqueness check
//! and the write happen under the same lock (or LMDB write transaction), so
//! two racing writers on one email cannot both succeed.

pub mod lmdb;
pub mod memory;

pub use lmdb::{LmdbContactStore, LmdbStoreError};
pub use memory::InMemoryContactStore;

use async_trait::async_trait;
use rolodex_core::{Contact, ContactFields, ContactId, RolodexResult, StorageError};

/// Name of the unique index reported in [`StorageError::DuplicateKey`].
pub const EMAIL_INDEX: &str = "email";

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Persistent collection of contacts.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new contact under a freshly assigned id.
    async fn insert(&self, fields: ContactFields) -> RolodexResult<Contact>;

    /// Every live contact, in no particular order.
    async fn list(&self) -> RolodexResult<Vec<Contact>>;

    async fn get(&self, id: ContactId) -> RolodexResult<Option<Contact>>;

    /// Replace all mutable fields of a contact. `None` when `id` is unknown.
    async fn replace(&self, id: ContactId, fields: ContactFields)
        -> RolodexResult<Option<Contact>>;

    /// Remove a contact, returning it. `None` when `id` is unknown.
    async fn remove(&self, id: ContactId) -> RolodexResult<Option<Contact>>;

    async fn count(&self) -> RolodexResult<usize>;
}

/// Build the uniqueness violation for `email`.
pub(crate) fn duplicate_email(email: &str) -> StorageError {
    StorageError::DuplicateKey {
        index: EMAIL_INDEX.to_string(),
        value: email.to_string(),
    }
}
