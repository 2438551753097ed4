//! In-memory contact store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rolodex_core::{Contact, ContactFields, ContactId, RolodexError, RolodexResult, StorageError};

use crate::{duplicate_email, ContactStore};

#[derive(Debug, Default)]
struct Inner {
    contacts: HashMap<ContactId, Contact>,
    by_email: HashMap<String, ContactId>,
}

/// Contact store held in process memory.
///
/// Contents are lost on drop. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactStore {
    inner: Arc<RwLock<Inner>>,
}

fn poisoned<T>(_: T) -> RolodexError {
    RolodexError::Storage(StorageError::LockPoisoned)
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every contact.
    pub fn clear(&self) -> RolodexResult<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.contacts.clear();
        inner.by_email.clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.contacts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, fields: ContactFields) -> RolodexResult<Contact> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.by_email.contains_key(&fields.email) {
            return Err(duplicate_email(&fields.email).into());
        }

        let contact = Contact::new(ContactId::now_v7(), fields);
        inner.by_email.insert(contact.fields.email.clone(), contact.id);
        inner.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn list(&self) -> RolodexResult<Vec<Contact>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contacts.values().cloned().collect())
    }

    async fn get(&self, id: ContactId) -> RolodexResult<Option<Contact>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contacts.get(&id).cloned())
    }

    async fn replace(
        &self,
        id: ContactId,
        fields: ContactFields,
    ) -> RolodexResult<Option<Contact>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let old_email = match inner.contacts.get(&id) {
            Some(existing) => existing.fields.email.clone(),
            None => return Ok(None),
        };

        if let Some(holder) = inner.by_email.get(&fields.email) {
            if *holder != id {
                return Err(duplicate_email(&fields.email).into());
            }
        }

        inner.by_email.remove(&old_email);
        inner.by_email.insert(fields.email.clone(), id);
        let contact = Contact::new(id, fields);
        inner.contacts.insert(id, contact.clone());
        Ok(Some(contact))
    }

    async fn remove(&self, id: ContactId) -> RolodexResult<Option<Contact>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let removed = inner.contacts.remove(&id);
        if let Some(contact) = &removed {
            inner.by_email.remove(&contact.fields.email);
        }
        Ok(removed)
    }

    async fn count(&self) -> RolodexResult<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contacts.len())
    }
}
