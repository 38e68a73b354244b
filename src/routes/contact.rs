use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use ksm_inquiry::InquiryInput;

use crate::{
    error::{ApiResponse, AppError},
    routes::AppState,
};

/// POST /api/contact - relay a contact form submission to the studio inbox
///
/// # Returns
/// - 200 OK: notification delivered
/// - 400 Bad Request: body is not a JSON inquiry
/// - 422 Unprocessable Entity: required fields missing or invalid, nothing is sent
/// - 500 Internal Server Error: delivery failed after retries
#[tracing::instrument(skip_all)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquiryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;

    let inquiry = input.into_inquiry().inspect_err(|errors| {
        tracing::info!(error = %errors, "Rejected invalid inquiry");
    })?;

    state.relay.relay(&inquiry).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Email sent successfully")),
    ))
}
