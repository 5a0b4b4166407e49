//! Contact form submission and validation

use std::sync::OnceLock;

use lettre::message::Mailbox;
use regex::Regex;
use serde::Deserialize;

use super::errors::{ContactError, ContactResult};

/// Raw form body. Every field is optional so that a missing field is a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Check an address against the `local@domain.tld` shape. It must also parse
/// as the mailbox the relay puts in `Reply-To`.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email) && email.parse::<Mailbox>().is_ok()
}

impl ContactRequest {
    /// Validate presence of all four fields, then the email shape.
    ///
    /// Surrounding whitespace is trimmed; a blank field counts as missing.
    pub fn validate(self) -> ContactResult<ContactSubmission> {
        let present = |field: Option<String>| {
            field
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(self.name),
            present(self.email),
            present(self.subject),
            present(self.message),
        ) else {
            return Err(ContactError::MissingFields);
        };

        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactSubmission {
            name,
            email,
            subject,
            message,
        })
    }
}
