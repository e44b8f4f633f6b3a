// Contact form: client-side checks plus one JSON POST to a Formspree-style endpoint

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SUBJECT: &str = "Portfolio Contact Form Submission";
const GENERIC_FAILURE: &str = "Failed to send message. Please try again.";

/// User-facing outcomes; `Display` is the message shown to the visitor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill out all fields.")]
    MissingFields,
    #[error("Please check the form hashid.")]
    BadHashid,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Form not found. Please check the Formspree ID or try again later.")]
    FormNotFound,
    #[error("Error: {0}")]
    Rejected(String),
    #[error("Network error. Please check your connection and try again.")]
    Network,
}

/// Raw field values as typed by the visitor
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub hashid: String,
}

/// JSON body sent to the form endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ContactForm {
    /// Trim the fields and run the checks in the order the visitor sees them
    pub fn validate(&self, expected_hashid: &str) -> Result<ContactMessage, FormError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(FormError::MissingFields);
        }
        if self.hashid != expected_hashid {
            return Err(FormError::BadHashid);
        }
        if !is_valid_email(email) {
            return Err(FormError::InvalidEmail);
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            subject: SUBJECT.to_string(),
        })
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dot with text on both sides
/// somewhere after the `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub struct FormClient {
    endpoint: String,
    expected_hashid: String,
    client: reqwest::Client,
}

impl FormClient {
    pub fn new(endpoint: impl Into<String>, expected_hashid: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            expected_hashid: expected_hashid.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Validate, then post once. No retries.
    pub async fn submit(&self, form: &ContactForm) -> Result<(), FormError> {
        let payload = form.validate(&self.expected_hashid)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Form request failed: {}", e);
                FormError::Network
            })?;

        if response.status().is_success() {
            log::info!("Contact message accepted ({})", response.status());
            return Ok(());
        }

        let status = response.status();
        let body: ErrorBody = response.json().await.map_err(|e| {
            log::warn!("Unreadable error body for status {}: {}", status, e);
            FormError::Network
        })?;

        Err(classify_rejection(body.error))
    }
}

fn classify_rejection(error: Option<String>) -> FormError {
    match error {
        Some(e) if e.contains("Form not found") => FormError::FormNotFound,
        Some(e) if !e.is_empty() => FormError::Rejected(e),
        _ => FormError::Rejected(GENERIC_FAILURE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str, hashid: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            hashid: hashid.to_string(),
        }
    }

    #[test]
    fn test_validation_order() {
        let missing = form("Ada", "not an email", "   ", "wrong");
        assert_eq!(missing.validate("id"), Err(FormError::MissingFields));

        let bad_hash = form("Ada", "not an email", "Hi", "wrong");
        assert_eq!(bad_hash.validate("id"), Err(FormError::BadHashid));

        let bad_email = form("Ada", "not an email", "Hi", "id");
        assert_eq!(bad_email.validate("id"), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let ok = form("  Ada ", " ada@example.com ", "\nHello\n", "id");
        let payload = ok.validate("id").unwrap();
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.message, "Hello");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["_subject"], SUBJECT);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn test_messages_match_visitor_copy() {
        assert_eq!(FormError::MissingFields.to_string(), "Please fill out all fields.");
        assert_eq!(
            FormError::Rejected("quota exceeded".into()).to_string(),
            "Error: quota exceeded"
        );
    }

    #[test]
    fn test_classify_rejection() {
        assert_eq!(
            classify_rejection(Some("Form not found: abc".into())),
            FormError::FormNotFound
        );
        assert_eq!(
            classify_rejection(Some("Spam detected".into())),
            FormError::Rejected("Spam detected".into())
        );
        assert_eq!(
            classify_rejection(None),
            FormError::Rejected(GENERIC_FAILURE.into())
        );
    }

    #[tokio::test]
    async fn test_invalid_form_never_hits_network() {
        let client = FormClient::new("http://127.0.0.1:9/", "id");
        let result = client.submit(&form("", "", "", "id")).await;
        assert_eq!(result, Err(FormError::MissingFields));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = FormClient::new("http://127.0.0.1:9/", "id");
        let result = client.submit(&form("Ada", "ada@example.com", "Hi", "id")).await;
        assert_eq!(result, Err(FormError::Network));
    }
}
