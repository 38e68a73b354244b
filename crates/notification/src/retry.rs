use std::time::Duration;

use crate::{MailError, Mailer, OutboundEmail};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Single shot, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Delay before attempt `attempt + 1`, where `attempt` counts from 1.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);

        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryFailure {
    pub attempts: u32,
    pub error: MailError,
}

/// Send `email` through `mailer`, retrying transient failures per `policy`.
///
/// Returns the number of attempts it took.
pub async fn deliver(
    mailer: &dyn Mailer,
    email: &OutboundEmail,
    policy: &RetryPolicy,
) -> Result<u32, DeliveryFailure> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match mailer.send(email).await {
            Ok(()) => return Ok(attempt),
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Email delivery failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                return Err(DeliveryFailure {
                    attempts: attempt,
                    error,
                });
            }
        }
    }
}
