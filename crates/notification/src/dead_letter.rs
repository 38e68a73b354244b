use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::{DeliveryFailure, OutboundEmail};

#[derive(Debug, Serialize)]
pub struct DeadLetter<'a> {
    pub reference: &'a str,
    pub failed_at: String,
    pub attempts: u32,
    pub error: String,
    pub email: &'a OutboundEmail,
}

/// Append-only JSON lines file holding notifications that exhausted their retries.
#[derive(Clone)]
pub struct DeadLetterQueue {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl DeadLetterQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn push(
        &self,
        reference: &str,
        email: &OutboundEmail,
        failure: &DeliveryFailure,
    ) -> io::Result<()> {
        let failed_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(io::Error::other)?;

        let letter = DeadLetter {
            reference,
            failed_at,
            attempts: failure.attempts,
            error: failure.error.to_string(),
            email,
        };

        let mut line = serde_json::to_vec(&letter)?;
        line.push(b'\n');

        let _guard = self.lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        tracing::warn!(
            reference,
            path = %self.path.display(),
            "Undeliverable notification written to dead-letter queue"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MailError;

    fn email(subject: &str) -> OutboundEmail {
        OutboundEmail {
            to: "inbox@example.com".to_string(),
            reply_to: Some("client@example.com".to_string()),
            subject: subject.to_string(),
            html: "<p>body</p>".to_string(),
            plain: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_push_appends_json_lines() -> anyhow::Result<()> {
        let dir = temp_dir::TempDir::new()?;
        let queue = DeadLetterQueue::new(dir.path().join("dead-letter.jsonl"));
        let failure = DeliveryFailure {
            attempts: 3,
            error: MailError::transient("connection refused"),
        };

        queue.push("ref-1", &email("first"), &failure).await?;
        queue.push("ref-2", &email("second"), &failure).await?;

        let content = tokio::fs::read_to_string(queue.path()).await?;
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["reference"], "ref-1");
        assert_eq!(lines[0]["attempts"], 3);
        assert_eq!(lines[0]["error"], "transport error: connection refused");
        assert_eq!(lines[0]["email"]["subject"], "first");
        assert_eq!(lines[1]["reference"], "ref-2");
        assert_eq!(lines[1]["email"]["reply_to"], "client@example.com");

        Ok(())
    }
}
