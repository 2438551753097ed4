//! Contact Service
//!
//! The CRUD boundary over the contact store. Every request body is trimmed and
//! checked for required fields here, before the store sees it. Store-level
//! uniqueness violations come back out as validation errors.

use std::sync::Arc;

use rolodex_core::{
    Contact, ContactFields, ContactId, RolodexError, RolodexResult, StorageError, ValidationError,
};
use rolodex_storage::{ContactStore, InMemoryContactStore, LmdbContactStore};

use crate::config::{ApiConfig, StoreBackend};

/// Contact operations shared by every route handler.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryContactStore::new()))
    }

    /// Open the store selected by `config`.
    ///
    /// # Errors
    /// Returns the store open failure. The server treats it as fatal.
    pub fn from_config(config: &ApiConfig) -> RolodexResult<Self> {
        let store: Arc<dyn ContactStore> = match config.store {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory contact store; contents are lost on restart");
                Arc::new(InMemoryContactStore::new())
            }
            StoreBackend::Lmdb => {
                let store = LmdbContactStore::open(&config.lmdb_path, config.lmdb_max_size_mb)?;
                tracing::info!(
                    path = %config.lmdb_path.display(),
                    max_size_mb = config.lmdb_max_size_mb,
                    "Opened LMDB contact store"
                );
                Arc::new(store)
            }
        };
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    /// Validate and persist a new contact.
    pub async fn create(&self, fields: ContactFields) -> RolodexResult<Contact> {
        let fields = fields.normalized();
        fields.validate()?;

        let contact = self.store.insert(fields).await.map_err(uniqueness)?;
        tracing::info!(contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// Every contact, unordered.
    pub async fn list(&self) -> RolodexResult<Vec<Contact>> {
        let contacts = self.store.list().await?;
        tracing::debug!(count = contacts.len(), "Contacts listed");
        Ok(contacts)
    }

    /// Replace every mutable field of an existing contact.
    pub async fn update(&self, id: ContactId, fields: ContactFields) -> RolodexResult<Contact> {
        let fields = fields.normalized();
        fields.validate()?;

        match self.store.replace(id, fields).await.map_err(uniqueness)? {
            Some(contact) => {
                tracing::info!(contact_id = %id, "Contact updated");
                Ok(contact)
            }
            None => {
                tracing::debug!(contact_id = %id, "Update target not found");
                Err(RolodexError::NotFound { id })
            }
        }
    }

    /// Remove a contact, returning what was removed.
    pub async fn delete(&self, id: ContactId) -> RolodexResult<Contact> {
        match self.store.remove(id).await? {
            Some(contact) => {
                tracing::info!(contact_id = %id, "Contact deleted");
                Ok(contact)
            }
            None => {
                tracing::debug!(contact_id = %id, "Delete target not found");
                Err(RolodexError::NotFound { id })
            }
        }
    }
}

/// Re-surface a store uniqueness violation as a duplicate-email validation error.
fn uniqueness(err: RolodexError) -> RolodexError {
    match err {
        RolodexError::Storage(StorageError::DuplicateKey { value, .. }) => {
            tracing::debug!(email = %value, "Duplicate email rejected");
            ValidationError::DuplicateEmail { email: value }.into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_test_utils::assertions::{assert_duplicate_email, assert_missing_field, assert_not_found};
    use rolodex_test_utils::fixtures::{full_fields, minimal_fields};

    #[tokio::test]
    async fn test_create_trims_and_assigns_id() {
        let service = ContactService::in_memory();
        let mut fields = minimal_fields();
        fields.first_name = "  A ".to_string();
        fields.company = Some("   ".to_string());

        let contact = service.create(fields).await.unwrap();
        assert_eq!(contact.fields.first_name, "A");
        assert_eq!(contact.fields.company, None);
        assert_eq!(service.list().await.unwrap(), vec![contact]);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_field_before_store() {
        let service = ContactService::in_memory();
        let mut fields = minimal_fields();
        fields.phone_number = " ".to_string();

        let result = service.create(fields).await;
        assert_missing_field(&result);
        assert_eq!(service.store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_validation_error() {
        let service = ContactService::in_memory();
        service.create(minimal_fields()).await.unwrap();

        let mut again = full_fields();
        again.email = " a@b.com ".to_string();
        let result = service.create(again).await;
        assert!(matches!(
            result,
            Err(RolodexError::Validation(ValidationError::DuplicateEmail { .. }))
        ));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_conflict_is_validation_error() {
        let service = ContactService::in_memory();
        service.create(minimal_fields()).await.unwrap();
        let other = service.create(full_fields()).await.unwrap();

        let mut clash = other.fields.clone();
        clash.email = "a@b.com".to_string();
        assert_duplicate_email(&service.update(other.id, clash).await);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let service = ContactService::in_memory();
        service.create(minimal_fields()).await.unwrap();
        let missing = ContactId::now_v7();

        assert_not_found(&service.update(missing, full_fields()).await);
        assert_not_found(&service.delete(missing).await);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_validates_before_existence() {
        let service = ContactService::in_memory();
        let result = service
            .update(ContactId::now_v7(), ContactFields::default())
            .await;
        assert_missing_field(&result);
    }

    #[tokio::test]
    async fn test_update_replaces_all_mutable_fields() {
        let service = ContactService::in_memory();
        let created = service.create(full_fields()).await.unwrap();

        let updated = service
            .update(created.id, minimal_fields())
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields, minimal_fields());
        assert_eq!(updated.fields.job_title, None);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_contact() {
        let service = ContactService::in_memory();
        let created = service.create(minimal_fields()).await.unwrap();
        let removed = service.delete(created.id).await.unwrap();
        assert_eq!(removed, created);
        assert!(service.list().await.unwrap().is_empty());
    }
}
