//! LMDB-backed contact store.
//!
//! Uses the heed crate (Rust bindings for LMDB) as a local document store.
//!
//! # Layout
//!
//! Two named databases live in one environment:
//! - `contacts`: 16-byte contact id -> JSON document
//! - `contacts_by_email`: SHA-256 of the email -> one or more 16-byte ids
//!
//! LMDB caps keys at 511 bytes, so the index is keyed by a fixed-width digest
//! instead of the email itself. Each id in a bucket is resolved against its
//! stored document and the full email compared, so two emails sharing a
//! digest never shadow each other.
//!
//! # Atomicity
//!
//! LMDB admits a single writer at a time. Every mutation runs the email
//! lookup and the writes inside one write transaction, so the unique-email
//! constraint holds under concurrent requests.

use std::path::Path;

use async_trait::async_trait;
use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RoTxn, RwTxn};
use rolodex_core::{Contact, ContactFields, ContactId, RolodexError, RolodexResult, StorageError};
use sha2::{Digest, Sha256};

use crate::{duplicate_email, ContactStore};

const CONTACTS_DB: &str = "contacts";
const EMAIL_INDEX_DB: &str = "contacts_by_email";

/// Error type for opening the LMDB environment.
#[derive(Debug, thiserror::Error)]
pub enum LmdbStoreError {
    /// Failed to open or create the LMDB environment.
    #[error("Failed to open LMDB environment: {0}")]
    EnvOpen(String),

    /// Failed to open a database within the environment.
    #[error("Failed to open database: {0}")]
    DbOpen(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LmdbStoreError> for RolodexError {
    fn from(e: LmdbStoreError) -> Self {
        RolodexError::Storage(StorageError::Backend {
            reason: e.to_string(),
        })
    }
}

fn backend(e: heed::Error) -> RolodexError {
    RolodexError::Storage(StorageError::Backend {
        reason: e.to_string(),
    })
}

fn serialization(e: serde_json::Error) -> RolodexError {
    RolodexError::Storage(StorageError::Serialization {
        reason: e.to_string(),
    })
}

fn corrupt_id(e: rolodex_core::ParseContactIdError) -> RolodexError {
    RolodexError::Storage(StorageError::Serialization {
        reason: e.to_string(),
    })
}

/// Index key for an email.
fn email_key(email: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&hasher.finalize());
    key
}

/// Persistent contact store on top of LMDB.
pub struct LmdbContactStore {
    env: Env,
    contacts: Database<Bytes, Bytes>,
    by_email: Database<Bytes, Bytes>,
}

impl LmdbContactStore {
    /// Open (or create) a store at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory where LMDB files will be stored
    /// * `max_size_mb` - Maximum size of the map in megabytes
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the
    /// environment and its databases cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, max_size_mb: usize) -> Result<Self, LmdbStoreError> {
        std::fs::create_dir_all(&path)?;

        // SAFETY: the environment is opened once per path per process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(max_size_mb * 1024 * 1024)
                .max_dbs(2)
                .open(path.as_ref())
        }
        .map_err(|e| LmdbStoreError::EnvOpen(e.to_string()))?;

        let mut wtxn = env
            .write_txn()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        let contacts: Database<Bytes, Bytes> = env
            .create_database(&mut wtxn, Some(CONTACTS_DB))
            .map_err(|e| LmdbStoreError::DbOpen(e.to_string()))?;
        let by_email: Database<Bytes, Bytes> = env
            .create_database(&mut wtxn, Some(EMAIL_INDEX_DB))
            .map_err(|e| LmdbStoreError::DbOpen(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| LmdbStoreError::Transaction(e.to_string()))?;

        Ok(Self {
            env,
            contacts,
            by_email,
        })
    }

    fn read_contact(&self, txn: &RoTxn, id: ContactId) -> RolodexResult<Option<Contact>> {
        match self.contacts.get(txn, id.as_bytes()).map_err(backend)? {
            Some(bytes) => {
                let fields: ContactFields = serde_json::from_slice(bytes).map_err(serialization)?;
                Ok(Some(Contact::new(id, fields)))
            }
            None => Ok(None),
        }
    }

    /// Ids filed under an email digest.
    fn bucket(&self, txn: &RoTxn, key: &[u8; 32]) -> RolodexResult<Vec<ContactId>> {
        match self.by_email.get(txn, key).map_err(backend)? {
            Some(bytes) => bytes
                .chunks(16)
                .map(ContactId::from_slice)
                .collect::<Result<Vec<_>, _>>()
                .map_err(corrupt_id),
            None => Ok(Vec::new()),
        }
    }

    fn put_bucket(&self, txn: &mut RwTxn, key: &[u8; 32], ids: &[ContactId]) -> RolodexResult<()> {
        if ids.is_empty() {
            self.by_email.delete(txn, key).map_err(backend)?;
            return Ok(());
        }
        let value: Vec<u8> = ids.iter().flat_map(|id| id.as_bytes().iter().copied()).collect();
        self.by_email.put(txn, key, &value).map_err(backend)
    }

    /// The contact currently holding `email`, compared on the full address.
    fn email_holder(&self, txn: &RoTxn, email: &str) -> RolodexResult<Option<ContactId>> {
        for id in self.bucket(txn, &email_key(email))? {
            if let Some(contact) = self.read_contact(txn, id)? {
                if contact.fields.email == email {
                    return Ok(Some(id));
                }
            }
        }
        Ok(None)
    }

    fn index_email(&self, txn: &mut RwTxn, email: &str, id: ContactId) -> RolodexResult<()> {
        let key = email_key(email);
        let mut ids = self.bucket(txn, &key)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
        self.put_bucket(txn, &key, &ids)
    }

    fn unindex_email(&self, txn: &mut RwTxn, email: &str, id: ContactId) -> RolodexResult<()> {
        let key = email_key(email);
        let mut ids = self.bucket(txn, &key)?;
        ids.retain(|held| *held != id);
        self.put_bucket(txn, &key, &ids)
    }

    fn write_contact(&self, txn: &mut RwTxn, contact: &Contact) -> RolodexResult<()> {
        let doc = serde_json::to_vec(&contact.fields).map_err(serialization)?;
        self.contacts
            .put(txn, contact.id.as_bytes(), &doc)
            .map_err(backend)?;
        self.index_email(txn, &contact.fields.email, contact.id)
    }
}

#[async_trait]
impl ContactStore for LmdbContactStore {
    async fn insert(&self, fields: ContactFields) -> RolodexResult<Contact> {
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        if self.email_holder(&wtxn, &fields.email)?.is_some() {
            return Err(duplicate_email(&fields.email).into());
        }

        let contact = Contact::new(ContactId::now_v7(), fields);
        self.write_contact(&mut wtxn, &contact)?;
        wtxn.commit().map_err(backend)?;
        Ok(contact)
    }

    async fn list(&self) -> RolodexResult<Vec<Contact>> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        let mut out = Vec::new();
        for entry in self.contacts.iter(&rtxn).map_err(backend)? {
            let (key, value) = entry.map_err(backend)?;
            let id = ContactId::from_slice(key).map_err(corrupt_id)?;
            let fields: ContactFields = serde_json::from_slice(value).map_err(serialization)?;
            out.push(Contact::new(id, fields));
        }
        Ok(out)
    }

    async fn get(&self, id: ContactId) -> RolodexResult<Option<Contact>> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        self.read_contact(&rtxn, id)
    }

    async fn replace(
        &self,
        id: ContactId,
        fields: ContactFields,
    ) -> RolodexResult<Option<Contact>> {
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        let existing = match self.read_contact(&wtxn, id)? {
            Some(existing) => existing,
            None => return Ok(None),
        };

        if let Some(holder) = self.email_holder(&wtxn, &fields.email)? {
            if holder != id {
                return Err(duplicate_email(&fields.email).into());
            }
        }

        if existing.fields.email != fields.email {
            self.unindex_email(&mut wtxn, &existing.fields.email, id)?;
        }

        let contact = Contact::new(id, fields);
        self.write_contact(&mut wtxn, &contact)?;
        wtxn.commit().map_err(backend)?;
        Ok(Some(contact))
    }

    async fn remove(&self, id: ContactId) -> RolodexResult<Option<Contact>> {
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        let existing = match self.read_contact(&wtxn, id)? {
            Some(existing) => existing,
            None => return Ok(None),
        };

        self.contacts
            .delete(&mut wtxn, id.as_bytes())
            .map_err(backend)?;
        self.unindex_email(&mut wtxn, &existing.fields.email, id)?;
        wtxn.commit().map_err(backend)?;
        Ok(Some(existing))
    }

    async fn count(&self) -> RolodexResult<usize> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        let len = self.contacts.len(&rtxn).map_err(backend)?;
        Ok(len as usize)
    }
}
