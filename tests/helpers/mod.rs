//! Test helpers: fake mail transports and a router wired to them

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use ksm_notification::{MailError, Mailer, OutboundEmail, RetryPolicy};
use ksm_portfolio::{AppState, InquiryRelay};
use tower::ServiceExt;

pub const INBOX: &str = "inbox@example.com";

/// Records every send; fails each call when `fail_with` is set.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_with: Option<MailError>,
}

impl RecordingMailer {
    pub fn failing(error: MailError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::ZERO,
        max_backoff: Duration::ZERO,
        multiplier: 2,
    }
}

pub fn app(mailer: Arc<RecordingMailer>) -> Router {
    app_with(InquiryRelay::new(mailer, INBOX).retry(fast_retry(3)))
}

pub fn app_with(relay: InquiryRelay) -> Router {
    ksm_portfolio::routes::router(AppState {
        relay: Arc::new(relay),
    })
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "projectType": "Custom Painting",
        "message": "I would like to commission a custom painting for my living room.",
    })
}

pub async fn post_json(app: Router, body: String) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&bytes)?))
}

pub async fn post_inquiry(
    app: Router,
    body: &serde_json::Value,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    post_json(app, body.to_string()).await
}
