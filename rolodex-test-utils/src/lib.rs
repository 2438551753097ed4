//! Rolodex Test Utilities
//!
//! Shared test infrastructure for the Rolodex workspace:
//! - Proptest generators for contacts and their fields
//! - Fixtures for common scenarios
//! - Assertions over `RolodexResult`

// Re-export the in-memory store from its source crate
pub use rolodex_storage::{ContactStore, InMemoryContactStore};

pub use rolodex_core::{
    Contact, ContactField, ContactFields, ContactId, RolodexError, RolodexResult, StorageError,
    ValidationError,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for contacts.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random ContactId.
    pub fn arb_contact_id() -> impl Strategy<Value = ContactId> {
        any::<[u8; 16]>().prop_map(|bytes| ContactId::from_uuid(Uuid::from_bytes(bytes)))
    }

    /// Generate a person name with mixed case and accented Latin letters.
    pub fn arb_name() -> impl Strategy<Value = String> {
        "[A-Za-zÀ-ÖØ-ÝŁŚŽ][a-zà-öø-ÿłśž]{0,11}"
    }

    /// Generate an email, occasionally one whose local part runs past 600 bytes.
    pub fn arb_email() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => ("[a-z0-9][a-z0-9._+-]{0,7}", "[a-z]{1,8}")
                .prop_map(|(user, domain)| format!("{user}@{domain}.com")),
            1 => arb_long_email(),
        ]
    }

    /// Generate an email longer than any LMDB key.
    pub fn arb_long_email() -> impl Strategy<Value = String> {
        ("[a-z]{1,8}", 600usize..=900, "[a-z]{1,8}").prop_map(|(seed, len, domain)| {
            let user: String = seed.chars().cycle().take(len).collect();
            format!("{user}@{domain}.com")
        })
    }

    pub fn arb_phone_number() -> impl Strategy<Value = String> {
        "[0-9]{3}-[0-9]{4}"
    }

    /// Generate a ContactField.
    pub fn arb_contact_field() -> impl Strategy<Value = ContactField> {
        prop::sample::select(ContactField::ALL.to_vec())
    }

    /// Generate valid, already-normalized contact fields.
    pub fn arb_contact_fields() -> impl Strategy<Value = ContactFields> {
        (
            arb_name(),
            arb_name(),
            arb_email(),
            arb_phone_number(),
            prop::option::of("[A-Z][a-z]{1,10}"),
            prop::option::of("[A-Z][a-z]{1,10}"),
        )
            .prop_map(
                |(first_name, last_name, email, phone_number, company, job_title)| ContactFields {
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    company,
                    job_title,
                },
            )
    }

    /// Generate fields with at least one required field blanked out.
    pub fn arb_fields_missing_required() -> impl Strategy<Value = ContactFields> {
        (
            arb_contact_fields(),
            prop::sample::select(ContactField::REQUIRED.to_vec()),
            prop::sample::select(vec!["", " ", "\t"]),
        )
            .prop_map(|(mut fields, field, blank)| {
                let blank = blank.to_string();
                match field {
                    ContactField::FirstName => fields.first_name = blank,
                    ContactField::LastName => fields.last_name = blank,
                    ContactField::Email => fields.email = blank,
                    ContactField::PhoneNumber => fields.phone_number = blank,
                    ContactField::Company | ContactField::JobTitle => {}
                }
                fields
            })
    }

    /// Generate a batch of field sets with pairwise-distinct emails.
    pub fn arb_contact_batch(max: usize) -> impl Strategy<Value = Vec<ContactFields>> {
        prop::collection::vec(arb_contact_fields(), 0..=max).prop_map(|batch| {
            batch
                .into_iter()
                .enumerate()
                .map(|(i, mut fields)| {
                    fields.email = format!("{}{}", i, fields.email);
                    fields
                })
                .collect()
        })
    }

    /// Generate stored contacts with distinct ids and emails.
    pub fn arb_contacts(max: usize) -> impl Strategy<Value = Vec<Contact>> {
        arb_contact_batch(max).prop_map(|batch| {
            batch
                .into_iter()
                .map(|fields| Contact::new(ContactId::now_v7(), fields))
                .collect()
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built contacts for common testing scenarios.

    use super::*;

    /// The minimal four-field contact used by the end-to-end scenario.
    pub fn minimal_fields() -> ContactFields {
        ContactFields::new("A", "B", "a@b.com", "123")
    }

    /// A contact with every field populated.
    pub fn full_fields() -> ContactFields {
        ContactFields::new("Ada", "Lovelace", "ada@example.com", "555-0100")
            .with_company("Analytical Engines")
            .with_job_title("Mathematician")
    }

    /// A small roster with distinct emails.
    pub fn roster() -> Vec<ContactFields> {
        vec![
            ContactFields::new("Grace", "Hopper", "grace@example.com", "555-0101")
                .with_company("Navy"),
            ContactFields::new("alan", "Turing", "alan@example.com", "555-0102"),
            ContactFields::new("Edsger", "Dijkstra", "edsger@example.com", "555-0103")
                .with_job_title("Professor"),
            full_fields(),
            ContactFields::new("barbara", "Liskov", "barbara@example.com", "555-0104"),
            ContactFields::new("Donald", "Knuth", "don@example.com", "555-0105"),
        ]
    }

    /// Roster contacts with fresh ids, as a client would hold them.
    pub fn roster_contacts() -> Vec<Contact> {
        roster()
            .into_iter()
            .map(|fields| Contact::new(ContactId::now_v7(), fields))
            .collect()
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over Rolodex results.

    use super::*;

    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &RolodexResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a result failed with a duplicate email.
    #[track_caller]
    pub fn assert_duplicate_email<T: std::fmt::Debug>(result: &RolodexResult<T>) {
        match result {
            Err(RolodexError::Validation(ValidationError::DuplicateEmail { .. })) => {}
            Err(RolodexError::Storage(StorageError::DuplicateKey { .. })) => {}
            other => panic!("Expected duplicate email error, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_missing_field<T: std::fmt::Debug>(result: &RolodexResult<T>) {
        assert!(
            matches!(
                result,
                Err(RolodexError::Validation(
                    ValidationError::RequiredFieldMissing { .. }
                ))
            ),
            "Expected missing field error, got: {:?}",
            result
        );
    }

    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &RolodexResult<T>) {
        assert!(
            matches!(result, Err(RolodexError::NotFound { .. })),
            "Expected not found error, got: {:?}",
            result
        );
    }
}
