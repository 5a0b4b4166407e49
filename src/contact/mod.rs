//! # Contact Form
//!
//! Validates contact submissions and relays them as HTML email to a fixed
//! recipient. Stateless: no persistence, no rate limiting, no retry.

pub mod errors;
pub mod mailer;
pub mod request;
pub mod template;

use std::sync::Arc;

pub use errors::{ContactError, ContactResult};
pub use mailer::{create_contact_mailer, ContactMailer, MockContactMailer, SmtpContactMailer};
pub use request::{is_valid_email, ContactRequest, ContactSubmission};
pub use template::{render_contact_email, ContactEmail};

use crate::config::MailConfig;

/// Validate, render, relay
pub struct ContactService {
    mailer: Arc<dyn ContactMailer>,
    config: MailConfig,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn ContactMailer>, config: MailConfig) -> Self {
        Self { mailer, config }
    }

    /// Handle one submission. Validation failures never reach the relay.
    pub async fn submit(&self, request: ContactRequest) -> ContactResult<()> {
        let submission = request.validate()?;
        let email = render_contact_email(&submission, &self.config);
        self.mailer.send(email).await
    }
}
