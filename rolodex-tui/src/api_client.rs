//! REST client for the contact endpoints.

use std::time::Duration;

use crate::config::TuiConfig;
use rolodex_api::error::{ApiError as ApiServerError, ErrorCode};
use rolodex_api::types::MessageResponse;
use rolodex_core::{Contact, ContactFields, ContactId};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The request never produced a usable response: connect failure,
    /// timeout, or a body that could not be decoded.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },
}

impl ApiClientError {
    /// True when the server rejected a write because the email is taken.
    pub fn is_duplicate_email(&self) -> bool {
        match self {
            ApiClientError::Api { code, message, .. } => {
                *code == Some(ErrorCode::DuplicateEmail)
                    || message.to_lowercase().contains("duplicate")
            }
            ApiClientError::Transport(_) => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiClientError::Api { status: 404, .. })
    }

    /// Message reported by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiClientError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiClientError> {
        let response = self.client.get(self.contacts_url()).send().await?;
        parse_response(response).await
    }

    pub async fn create_contact(&self, fields: &ContactFields) -> Result<Contact, ApiClientError> {
        let response = self
            .client
            .post(self.contacts_url())
            .json(fields)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn update_contact(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<Contact, ApiClientError> {
        let response = self
            .client
            .put(self.contact_url(id))
            .json(fields)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_contact(&self, id: ContactId) -> Result<MessageResponse, ApiClientError> {
        let response = self.client.delete(self.contact_url(id)).send().await?;
        parse_response(response).await
    }

    fn contacts_url(&self) -> String {
        format!("{}/api/contacts", self.base_url)
    }

    fn contact_url(&self, id: ContactId) -> String {
        format!("{}/api/contacts/{}", self.base_url, id)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    if let Ok(api_error) = serde_json::from_str::<ApiServerError>(&text) {
        return Err(ApiClientError::Api {
            status: status.as_u16(),
            code: Some(api_error.code),
            message: api_error.message,
        });
    }
    Err(ApiClientError::Api {
        status: status.as_u16(),
        code: None,
        message: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: Option<ErrorCode>, message: &str) -> ApiClientError {
        ApiClientError::Api {
            status: 400,
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_duplicate_detected_by_code() {
        assert!(api_error(Some(ErrorCode::DuplicateEmail), "taken").is_duplicate_email());
    }

    #[test]
    fn test_duplicate_detected_by_message() {
        assert!(api_error(None, "E11000 Duplicate key").is_duplicate_email());
        assert!(!api_error(Some(ErrorCode::MissingField), "phoneNumber is required")
            .is_duplicate_email());
    }

    #[test]
    fn test_server_message_skips_blank() {
        assert_eq!(api_error(None, "  ").server_message(), None);
        assert_eq!(api_error(None, "boom").server_message(), Some("boom"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            RestClient::with_base_url("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.contacts_url(), "http://localhost:5000/api/contacts");
    }
}
