//! Feedback submission handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{FeedbackResponse, SubmitFeedbackRequest};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /feedback` — Submit free-text feedback.
///
/// # Errors
///
/// Returns [`LedgerError::MissingField`] if the feedback text is blank.
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    tag = "Feedback",
    summary = "Submit feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded", body = FeedbackResponse),
        (status = 400, description = "Blank feedback", body = ErrorResponse),
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SubmitFeedbackRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let feedback = state
        .ledger_service
        .submit_feedback(&req.name, &req.email, &req.feedback)
        .await?;
    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(&feedback))))
}

/// Feedback routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/feedback", post(submit_feedback))
}
