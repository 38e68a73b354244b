//! Email notification service using lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use serde::Serialize;

use crate::{EmailConfig, MailError};

/// A fully rendered message waiting for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub plain: String,
}

/// Outbound mail transport.
///
/// One call is one delivery attempt. Retrying is the caller's business, see [`crate::deliver`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// SMTP mailer authenticating against a relay such as Gmail
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config.from_address.parse()?,
        );

        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let builder = if config.starttls {
            SmtpTransport::starttls_relay(&config.smtp_host)?
        } else {
            SmtpTransport::relay(&config.smtp_host)?
        };

        let mailer = builder
            .port(config.smtp_port)
            .credentials(creds)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            starttls = config.starttls,
            from = %config.from_address,
            timeout_secs = config.timeout_secs,
            "Email service initialized with authentication and TLS"
        );

        Ok(Self { mailer, from })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject.as_str());

        if let Some(reply_to) = &email.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(err) => {
                    tracing::warn!(reply_to = %reply_to, error = %err, "Dropping unparsable Reply-To")
                }
            }
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(
            email.plain.clone(),
            email.html.clone(),
        ))?)
    }
}

#[async_trait]
impl Mailer for EmailService {
    #[tracing::instrument(skip_all, fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        tracing::info!("Sending email");

        // SmtpTransport is blocking, keep it off the runtime workers
        let mailer = self.mailer.clone();
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|err| MailError::transient(format!("send task aborted: {err}")))??;

        Ok(())
    }
}
