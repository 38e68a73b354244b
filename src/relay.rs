use std::sync::Arc;

use ksm_inquiry::{ComposeError, Inquiry, Notification};
use ksm_notification::{
    DeadLetterQueue, EmailService, MailError, Mailer, OutboundEmail, RetryPolicy, deliver,
};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to compose notification")]
    Compose(#[from] ComposeError),

    #[error("Mail delivery failed after {attempts} attempt(s)")]
    Delivery { attempts: u32, source: MailError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub reference: Uuid,
    pub attempts: u32,
}

/// Turns inquiries into notifications for the studio inbox.
///
/// Holds no per-request state: concurrent calls are independent and
/// identical inquiries are delivered once per call.
#[derive(Clone)]
pub struct InquiryRelay {
    mailer: Arc<dyn Mailer>,
    inbox: String,
    retry: RetryPolicy,
    dead_letters: Option<DeadLetterQueue>,
}

impl InquiryRelay {
    pub fn new(mailer: Arc<dyn Mailer>, inbox: impl Into<String>) -> Self {
        Self {
            mailer,
            inbox: inbox.into(),
            retry: RetryPolicy::default(),
            dead_letters: None,
        }
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn dead_letters(mut self, queue: DeadLetterQueue) -> Self {
        self.dead_letters = Some(queue);
        self
    }

    /// Build a relay backed by SMTP, refusing an incomplete configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mailer = EmailService::new(&config.email)?;
        let mut relay = Self::new(Arc::new(mailer), config.relay.inbox_address.trim())
            .retry(config.relay.retry_policy());

        if let Some(path) = &config.relay.dead_letter_path {
            relay = relay.dead_letters(DeadLetterQueue::new(path));
        }

        Ok(relay)
    }

    pub fn inbox(&self) -> &str {
        &self.inbox
    }

    #[tracing::instrument(skip_all, fields(reference = tracing::field::Empty))]
    pub async fn relay(&self, inquiry: &Inquiry) -> Result<Delivery, RelayError> {
        let reference = Uuid::new_v4();
        tracing::Span::current().record("reference", tracing::field::display(reference));

        if !inquiry.has_known_project_type() {
            tracing::warn!(project_type = %inquiry.project_type, "Unlisted project type");
        }

        let notification = Notification::compose(inquiry, OffsetDateTime::now_utc())?;
        let email = OutboundEmail {
            to: self.inbox.clone(),
            reply_to: Some(inquiry.email.clone()),
            subject: notification.subject,
            html: notification.html,
            plain: notification.plain,
        };

        match deliver(self.mailer.as_ref(), &email, &self.retry).await {
            Ok(attempts) => {
                tracing::info!(attempts, project_type = %inquiry.project_type, "Inquiry delivered");
                Ok(Delivery {
                    reference,
                    attempts,
                })
            }
            Err(failure) => {
                tracing::error!(
                    attempts = failure.attempts,
                    error = %failure.error,
                    "Inquiry delivery failed"
                );

                if let Some(queue) = &self.dead_letters {
                    let reference = reference.to_string();
                    if let Err(err) = queue.push(&reference, &email, &failure).await {
                        tracing::error!(error = %err, "Failed to write dead letter");
                    }
                }

                Err(RelayError::Delivery {
                    attempts: failure.attempts,
                    source: failure.error,
                })
            }
        }
    }
}
