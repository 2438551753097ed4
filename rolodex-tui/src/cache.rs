//! Client-side copy of the server's contact list.
//!
//! The cache is only changed through the methods below. Nothing else holds a
//! mutable reference to the vector.

use rolodex_core::{Contact, ContactId};

#[derive(Debug, Clone, Default)]
pub struct ContactCache {
    contacts: Vec<Contact>,
    loaded: bool,
}

impl ContactCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether at least one fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        self.loaded = true;
    }

    /// Add a freshly created contact. An entry with the same id is replaced.
    pub fn append(&mut self, contact: Contact) {
        if !self.replace(contact.clone()) {
            self.contacts.push(contact);
        }
    }

    /// Swap in the server's copy of an updated contact. Returns false when
    /// the id is not cached.
    pub fn replace(&mut self, contact: Contact) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(slot) => {
                *slot = contact;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(index))
    }

    /// Apply the result of a full fetch. On error the previous contents stay.
    pub fn refresh<E>(&mut self, result: Result<Vec<Contact>, E>) -> Result<usize, E> {
        let contacts = result?;
        let count = contacts.len();
        self.replace_all(contacts);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_core::ContactFields;

    fn contact(email: &str) -> Contact {
        Contact::new(
            ContactId::now_v7(),
            ContactFields::new("A", "B", email, "123"),
        )
    }

    #[test]
    fn test_append_then_remove() {
        let mut cache = ContactCache::new();
        let a = contact("a@b.com");
        cache.append(a.clone());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(a.id), Some(a));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_append_existing_id_replaces() {
        let mut cache = ContactCache::new();
        let mut a = contact("a@b.com");
        cache.append(a.clone());
        a.fields.last_name = "C".to_string();
        cache.append(a.clone());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(a.id).unwrap().fields.last_name, "C");
    }

    #[test]
    fn test_replace_unknown_is_noop() {
        let mut cache = ContactCache::new();
        cache.append(contact("a@b.com"));
        assert!(!cache.replace(contact("x@y.com")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_refresh_error_keeps_contents() {
        let mut cache = ContactCache::new();
        cache.refresh::<String>(Ok(vec![contact("a@b.com"), contact("c@d.com")]))
            .unwrap();
        assert!(cache.is_loaded());

        let result = cache.refresh(Err("offline".to_string()));
        assert_eq!(result, Err("offline".to_string()));
        assert_eq!(cache.len(), 2);
    }
}
