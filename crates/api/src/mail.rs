//! Outbound SMTP mail for contact-message notifications.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`MailConfig::from_env`] returns `None` and no mailer is constructed.
//! Sending is always fire-and-forget from the handlers' point of view:
//! failures are logged, never surfaced to the HTTP response.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use folio_db::models::message::ContactMessage;

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@folio.local";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Address notified of new contact messages.
    pub admin_email: Option<String>,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that mail
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      | --                    |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@folio.local` |
    /// | `SMTP_USER`     | no       | --                    |
    /// | `SMTP_PASSWORD` | no       | --                    |
    /// | `ADMIN_EMAIL`   | no       | --                    |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
        })
    }
}

/// Sends contact-message notification emails via SMTP.
pub struct Mailer {
    config: MailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build a mailer for the given configuration.
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Send a plain-text email.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(email).await?;
        tracing::info!(to, subject, "Email sent");
        Ok(())
    }

    /// Notify the configured admin address of a new contact message.
    ///
    /// A no-op when `ADMIN_EMAIL` is not set. Failures are logged only.
    pub async fn notify_admin(&self, msg: &ContactMessage) {
        let Some(admin_email) = &self.config.admin_email else {
            tracing::debug!("ADMIN_EMAIL not set, skipping admin notification");
            return;
        };

        let subject = format!("New contact message: {}", msg.subject);
        let body = format!(
            "From: {} <{}>\nPhone: {}\nReceived: {}\n\n{}",
            msg.name,
            msg.email,
            msg.phone.as_deref().unwrap_or("-"),
            msg.created_at,
            msg.body,
        );

        if let Err(e) = self.send(admin_email, &subject, &body).await {
            tracing::warn!(error = %e, "Failed to send admin notification email");
        }
    }

    /// Send an auto-reply acknowledging receipt to the message sender.
    ///
    /// Failures are logged only.
    pub async fn auto_reply(&self, msg: &ContactMessage) {
        let subject = "Thank you for your message".to_string();
        let body = format!(
            "Hi {},\n\nThank you for contacting us! We'll respond within 24 hours.\n\n\
             Your message:\n{}\n\nBest regards,\nPortfolio Team",
            msg.name, msg.body,
        );

        if let Err(e) = self.send(&msg.email, &subject, &body).await {
            tracing::warn!(error = %e, "Failed to send auto-reply email");
        }
    }
}
