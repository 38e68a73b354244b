use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::relay::RelayError;

/// JSON body returned by the contact endpoint, on success and on failure
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub message: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            message,
            success: true,
            error: None,
            details: None,
        }
    }

    fn failure(message: &'static str, error: String) -> Self {
        Self {
            message,
            success: false,
            error: Some(error),
            details: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error(transparent)]
    RelayError(#[from] RelayError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::MalformedBody(reason) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Invalid request body", reason),
            ),
            AppError::ValidationError(errors) => {
                let details: BTreeMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        (
                            field.to_string(),
                            errors.iter().map(|e| e.code.to_string()).collect(),
                        )
                    })
                    .collect();

                let fields = details.keys().cloned().collect::<Vec<_>>().join(", ");

                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse {
                        details: Some(details),
                        ..ApiResponse::failure(
                            "Invalid inquiry",
                            format!("Missing or invalid fields: {fields}"),
                        )
                    },
                )
            }
            AppError::RelayError(e) => {
                // the transport detail was already logged by the relay
                tracing::error!("Relay error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Failed to send email", e.to_string()),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
