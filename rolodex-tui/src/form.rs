//! Contact form state shared by the create panel and the inline editor.

use rolodex_core::{Contact, ContactField, ContactFields, ContactId};

use crate::api_client::ApiClientError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "All required fields must be filled out.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "A contact with this email already exists.";
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving the contact.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ContactId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    mode: FormMode,
    /// Raw input, indexed like `ContactField::ALL`.
    values: [String; 6],
    focused: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl ContactForm {
    /// Blank form for adding a contact.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: Default::default(),
            focused: 0,
            error: None,
            submitting: false,
        }
    }

    /// Form pre-filled from an existing contact.
    pub fn edit(contact: &Contact) -> Self {
        let values = ContactField::ALL.map(|field| contact.field(field).to_string());
        Self {
            mode: FormMode::Edit(contact.id),
            values,
            focused: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<ContactId> {
        match self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn value(&self, field: ContactField) -> &str {
        &self.values[index_of(field)]
    }

    pub fn set_value(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[index_of(field)] = value.into();
    }

    pub fn focused_field(&self) -> ContactField {
        ContactField::ALL[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % ContactField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + ContactField::ALL.len() - 1) % ContactField::ALL.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.values[self.focused].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focused].pop();
    }

    /// Current input as request fields. Blank optional fields become `None`.
    pub fn to_fields(&self) -> ContactFields {
        let optional = |field| {
            let value = self.value(field).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        ContactFields {
            first_name: self.value(ContactField::FirstName).to_string(),
            last_name: self.value(ContactField::LastName).to_string(),
            email: self.value(ContactField::Email).to_string(),
            phone_number: self.value(ContactField::PhoneNumber).to_string(),
            company: optional(ContactField::Company),
            job_title: optional(ContactField::JobTitle),
        }
        .normalized()
    }

    /// Check required fields before anything is sent. On failure the form
    /// error is set and nothing else changes.
    pub fn validate(&mut self) -> Result<ContactFields, &'static str> {
        let fields = self.to_fields();
        if !fields.missing_required().is_empty() {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_string());
            return Err(REQUIRED_FIELDS_MESSAGE);
        }
        self.error = None;
        self.submitting = true;
        Ok(fields)
    }

    /// Record a rejected submission. Input is kept for correction.
    pub fn submission_failed(&mut self, err: &ApiClientError) {
        self.submitting = false;
        let message = if err.is_duplicate_email() {
            DUPLICATE_EMAIL_MESSAGE.to_string()
        } else {
            err.server_message()
                .map(str::to_string)
                .unwrap_or_else(|| SAVE_FAILED_MESSAGE.to_string())
        };
        self.error = Some(message);
    }

    /// Clear all input after a successful create.
    pub fn reset(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::create()
        };
    }
}

fn index_of(field: ContactField) -> usize {
    ContactField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_api::ErrorCode;

    fn filled() -> ContactForm {
        let mut form = ContactForm::create();
        form.set_value(ContactField::FirstName, "A");
        form.set_value(ContactField::LastName, "B");
        form.set_value(ContactField::Email, "a@b.com");
        form.set_value(ContactField::PhoneNumber, "123");
        form
    }

    #[test]
    fn test_validate_blank_required() {
        let mut form = filled();
        form.set_value(ContactField::PhoneNumber, "   ");
        assert_eq!(form.validate(), Err(REQUIRED_FIELDS_MESSAGE));
        assert_eq!(form.error.as_deref(), Some(REQUIRED_FIELDS_MESSAGE));
        assert!(!form.submitting);
    }

    #[test]
    fn test_validate_builds_fields() {
        let mut form = filled();
        form.set_value(ContactField::Company, "  ");
        let fields = form.validate().unwrap();
        assert_eq!(fields, ContactFields::new("A", "B", "a@b.com", "123"));
        assert!(form.submitting);
    }

    #[test]
    fn test_edit_prefills() {
        let contact = Contact::new(
            ContactId::now_v7(),
            ContactFields::new("Ada", "Lovelace", "ada@example.com", "1").with_company("AE"),
        );
        let form = ContactForm::edit(&contact);
        assert_eq!(form.editing_id(), Some(contact.id));
        assert_eq!(form.value(ContactField::Company), "AE");
        assert_eq!(form.value(ContactField::JobTitle), "");
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ContactForm::create();
        form.insert_char('x');
        form.focus_next();
        form.insert_char('y');
        form.insert_char('z');
        form.backspace();
        assert_eq!(form.value(ContactField::FirstName), "x");
        assert_eq!(form.value(ContactField::LastName), "y");
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focused_field(), ContactField::JobTitle);
    }

    #[test]
    fn test_submission_failed_messages() {
        let mut form = filled();
        form.submission_failed(&ApiClientError::Api {
            status: 400,
            code: Some(ErrorCode::DuplicateEmail),
            message: "duplicate email".to_string(),
        });
        assert_eq!(form.error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));

        form.submission_failed(&ApiClientError::Api {
            status: 500,
            code: Some(ErrorCode::DatabaseError),
            message: "Database operation failed".to_string(),
        });
        assert_eq!(form.error.as_deref(), Some("Database operation failed"));

        form.submission_failed(&ApiClientError::Api {
            status: 500,
            code: None,
            message: String::new(),
        });
        assert_eq!(form.error.as_deref(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(form.value(ContactField::Email), "a@b.com");
    }

    #[test]
    fn test_reset_clears_input() {
        let mut form = filled();
        form.error = Some("x".to_string());
        form.reset();
        assert_eq!(form, ContactForm::create());
    }
}
