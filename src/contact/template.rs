//! Contact email template

use super::request::ContactSubmission;
use crate::config::MailConfig;

/// A rendered message ready for the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Render a validated submission. All user input is HTML-escaped.
pub fn render_contact_email(submission: &ContactSubmission, config: &MailConfig) -> ContactEmail {
    let site = escape_html(&config.site_name);
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let subject = escape_html(&submission.subject);
    let message = escape_html(&submission.message);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #667eea;">New Contact Form Submission</h2>
    <div style="background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Subject:</strong> {subject}</p>
    </div>
    <div style="background: white; padding: 20px; border: 1px solid #e9ecef; border-radius: 8px;">
        <h3 style="color: #2d3748; margin-top: 0;">Message:</h3>
        <p style="white-space: pre-wrap; line-height: 1.6;">{message}</p>
    </div>
    <p style="color: #636e72; font-size: 0.9em; margin-top: 20px;">
        This email was sent from the {site} contact form.
    </p>
</div>
"#
    );

    ContactEmail {
        to: config.recipient.clone(),
        reply_to: submission.email.clone(),
        // Subject is a header, not HTML; the relay handles encoding.
        subject: format!("[{} Contact] {}", config.site_name, submission.subject),
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
