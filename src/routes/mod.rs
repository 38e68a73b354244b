use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::relay::InquiryRelay;

mod contact;
mod health;

pub use contact::submit_inquiry;
pub use health::health;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<InquiryRelay>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(submit_inquiry))
        .with_state(app_state)
}
