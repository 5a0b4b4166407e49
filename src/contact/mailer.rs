//! # Mail Relay
//!
//! Delivery of rendered contact emails.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::errors::{ContactError, ContactResult};
use super::template::ContactEmail;
use crate::config::MailConfig;

/// Mail relay trait for abstraction
#[async_trait]
pub trait ContactMailer: Send + Sync {
    /// Deliver one message. No retries.
    async fn send(&self, email: ContactEmail) -> ContactResult<()>;
}

/// Mock mailer for testing
#[derive(Debug, Default)]
pub struct MockContactMailer {
    sent: Mutex<Vec<ContactEmail>>,
    failure: Option<String>,
}

impl MockContactMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<ContactEmail> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent().len()
    }
}

#[async_trait]
impl ContactMailer for MockContactMailer {
    async fn send(&self, email: ContactEmail) -> ContactResult<()> {
        if let Some(message) = &self.failure {
            return Err(ContactError::Relay(message.clone()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(email);
        Ok(())
    }
}

/// SMTP relay (Gmail by default)
pub struct SmtpContactMailer {
    config: MailConfig,
}

impl SmtpContactMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, email: &ContactEmail) -> ContactResult<lettre::Message> {
        use lettre::message::{header::ContentType, Mailbox};

        let user = self
            .config
            .smtp_user
            .as_deref()
            .ok_or(ContactError::RelayNotConfigured)?;

        let from: Mailbox = format!("{} <{}>", self.config.site_name, user)
            .parse()
            .map_err(|e| ContactError::Relay(format!("Invalid from address: {}", e)))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| ContactError::Relay(format!("Invalid to address: {}", e)))?;
        let reply_to: Mailbox = email
            .reply_to
            .parse()
            .map_err(|e| ContactError::Relay(format!("Invalid reply-to address: {}", e)))?;

        lettre::Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| ContactError::Relay(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl ContactMailer for SmtpContactMailer {
    async fn send(&self, email: ContactEmail) -> ContactResult<()> {
        use lettre::{
            transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
            Tokio1Executor,
        };

        let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        else {
            return Err(ContactError::RelayNotConfigured);
        };

        let message = self.build_message(&email)?;
        let creds = Credentials::new(user.clone(), password.clone());

        // 465 is implicit TLS; anything else negotiates STARTTLS
        let builder = match self.config.smtp_port {
            465 => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host),
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host),
        }
        .map_err(|e| ContactError::Relay(format!("SMTP relay error: {}", e)))?;

        let mailer = builder
            .credentials(creds)
            .port(self.config.smtp_port)
            .build();

        mailer
            .send(message)
            .await
            .map_err(|e| ContactError::Relay(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %email.to, reply_to = %email.reply_to, "contact email relayed");
        Ok(())
    }
}

/// Create the relay used by the server
pub fn create_contact_mailer(config: &MailConfig) -> Arc<dyn ContactMailer> {
    if !config.has_credentials() {
        tracing::warn!("GMAIL_USER / GMAIL_APP_PASSWORD not set; contact form will return 500");
    }
    Arc::new(SmtpContactMailer::new(config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> ContactEmail {
        ContactEmail {
            to: "owner@example.com".to_string(),
            reply_to: "ada@example.com".to_string(),
            subject: "[RealtimeKeyword Contact] Hi".to_string(),
            html: "<p>hello</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_mailer_records_messages() {
        let mailer = MockContactMailer::new();
        mailer.send(email()).await.unwrap();

        assert_eq!(mailer.sent_count(), 1);
        assert_eq!(mailer.sent()[0].reply_to, "ada@example.com");
    }

    #[tokio::test]
    async fn test_failing_mock_surfaces_message() {
        let mailer = MockContactMailer::failing("535 authentication failed");
        let err = mailer.send(email()).await.unwrap_err();

        assert_eq!(err.to_string(), "535 authentication failed");
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_smtp_without_credentials_fails_before_connecting() {
        let mailer = SmtpContactMailer::new(MailConfig::default());
        let err = mailer.send(email()).await.unwrap_err();

        assert!(matches!(err, ContactError::RelayNotConfigured));
    }

    #[test]
    fn test_smtp_message_sets_reply_to() {
        let mailer = SmtpContactMailer::new(MailConfig {
            smtp_user: Some("bot@example.com".to_string()),
            smtp_password: Some("secret".to_string()),
            ..MailConfig::default()
        });

        let message = mailer.build_message(&email()).unwrap();
        let headers = String::from_utf8(message.formatted()).unwrap();
        assert!(headers.contains("Reply-To: ada@example.com"));
        assert!(headers.contains("To: owner@example.com"));
        assert!(headers.contains("RealtimeKeyword <bot@example.com>"));
    }
}
