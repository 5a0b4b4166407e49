//! # Contact Errors

use thiserror::Error;

/// Result type for contact form operations
pub type ContactResult<T> = Result<T, ContactError>;

/// Contact form errors
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    // ==================
    // Validation Errors
    // ==================
    /// One or more of name, email, subject, message is missing or blank
    #[error("All fields are required")]
    MissingFields,

    /// Email does not look like local@domain.tld
    #[error("Invalid email format")]
    InvalidEmail,

    /// Request body is not a JSON object
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    // ==================
    // Relay Errors
    // ==================
    /// Relay credentials are not configured
    #[error("Mail relay is not configured")]
    RelayNotConfigured,

    /// Message could not be built or delivered
    #[error("{0}")]
    Relay(String),
}

impl ContactError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ContactError::MissingFields => 400,
            ContactError::InvalidEmail => 400,
            ContactError::MalformedBody(_) => 400,
            ContactError::RelayNotConfigured => 500,
            ContactError::Relay(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
