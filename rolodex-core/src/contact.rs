//! Contact entity and field-level validation

use crate::{ContactId, ValidationError};
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELDS
// ============================================================================

/// One of the six mutable contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Company,
    JobTitle,
}

impl ContactField {
    /// Every field, in display order.
    pub const ALL: [ContactField; 6] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::PhoneNumber,
        ContactField::Company,
        ContactField::JobTitle,
    ];

    /// Fields that must be non-empty, in the order they are checked.
    pub const REQUIRED: [ContactField; 4] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::PhoneNumber,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::FirstName => "First Name",
            ContactField::LastName => "Last Name",
            ContactField::Email => "Email",
            ContactField::PhoneNumber => "Phone Number",
            ContactField::Company => "Company",
            ContactField::JobTitle => "Job Title",
        }
    }

    /// Name used in JSON bodies.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Email => "email",
            ContactField::PhoneNumber => "phoneNumber",
            ContactField::Company => "company",
            ContactField::JobTitle => "jobTitle",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

/// The mutable part of a contact.
///
/// Used as the create/update request body and stored verbatim inside
/// [`Contact`]. Required fields default to the empty string when absent so a
/// missing key is reported as a validation failure rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl ContactFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            company: None,
            job_title: None,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    /// Trim every field. Blank optional fields collapse to `None`.
    pub fn normalized(&self) -> Self {
        fn optional(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            company: optional(&self.company),
            job_title: optional(&self.job_title),
        }
    }

    /// Read a field as text. Absent optional fields read as `""`.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Company => self.company.as_deref().unwrap_or(""),
            ContactField::JobTitle => self.job_title.as_deref().unwrap_or(""),
        }
    }

    /// Required fields that are empty or whitespace-only.
    pub fn missing_required(&self) -> Vec<ContactField> {
        ContactField::REQUIRED
            .iter()
            .copied()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Check required-field presence, reporting the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.missing_required().first() {
            Some(field) => Err(ValidationError::RequiredFieldMissing {
                field: field.wire_name().to_string(),
            }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// CONTACT
// ============================================================================

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Contact {
    pub id: ContactId,
    #[serde(flatten)]
    pub fields: ContactFields,
}

impl Contact {
    pub fn new(id: ContactId, fields: ContactFields) -> Self {
        Self { id, fields }
    }

    pub fn field(&self, field: ContactField) -> &str {
        self.fields.get(field)
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    /// "First Last", used in confirmations and notifications.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> ContactFields {
        ContactFields::new("Ada", "Lovelace", "ada@example.com", "555-0100")
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let contact = Contact::new(ContactId::now_v7(), sample().with_company("Analytical"));
        let value = serde_json::to_value(&contact).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert_eq!(obj["firstName"], "Ada");
        assert_eq!(obj["phoneNumber"], "555-0100");
        assert_eq!(obj["company"], "Analytical");
        assert!(!obj.contains_key("jobTitle"));
        assert!(!obj.contains_key("fields"));
    }

    #[test]
    fn test_missing_keys_decode_as_empty() {
        let fields: ContactFields = serde_json::from_str(r#"{"firstName":"A"}"#).unwrap();
        assert_eq!(fields.first_name, "A");
        assert_eq!(fields.last_name, "");
        assert!(fields.company.is_none());
        assert_eq!(
            fields.validate(),
            Err(ValidationError::RequiredFieldMissing {
                field: "lastName".to_string()
            })
        );
    }

    #[test]
    fn test_validate_reports_first_missing_in_order() {
        let fields = ContactFields::new("A", "", "", "123");
        assert_eq!(
            fields.missing_required(),
            vec![ContactField::LastName, ContactField::Email]
        );
        match fields.validate() {
            Err(ValidationError::RequiredFieldMissing { field }) => assert_eq!(field, "lastName"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let fields = ContactFields::new("  ", "B", "a@b.com", "123");
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_optionals() {
        let fields = ContactFields::new(" A ", "B ", " a@b.com", "123")
            .with_company("   ")
            .with_job_title(" Engineer ");
        let normalized = fields.normalized();
        assert_eq!(normalized.first_name, "A");
        assert_eq!(normalized.email, "a@b.com");
        assert_eq!(normalized.company, None);
        assert_eq!(normalized.job_title.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_field_reads_optional_as_empty() {
        let contact = Contact::new(ContactId::now_v7(), sample());
        assert_eq!(contact.field(ContactField::Company), "");
        assert_eq!(contact.field(ContactField::Email), "ada@example.com");
        assert_eq!(contact.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_required_set() {
        assert!(ContactField::Email.is_required());
        assert!(!ContactField::JobTitle.is_required());
        assert_eq!(ContactField::ALL.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_normalized_is_idempotent(
            first in ".{0,12}",
            last in ".{0,12}",
            company in proptest::option::of(".{0,12}"),
        ) {
            let mut fields = ContactFields::new(first, last, "x@y.z", "1");
            fields.company = company;
            let once = fields.normalized();
            prop_assert_eq!(once.normalized(), once);
        }

        #[test]
        fn prop_non_blank_required_fields_validate(
            first in "[A-Za-z]{1,10}",
            last in "[A-Za-z]{1,10}",
            phone in "[0-9]{3,10}",
        ) {
            let fields = ContactFields::new(first, last, "p@q.r", phone);
            prop_assert!(fields.validate().is_ok());
            prop_assert!(fields.missing_required().is_empty());
        }
    }
}
