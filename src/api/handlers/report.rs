//! Report handlers: bookings per route, feedback.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{FeedbackResponse, RouteReportResponse};
use crate::app_state::AppState;
use crate::error::LedgerError;

/// `GET /reports/routes` — Bookings grouped by route, plus chart series.
///
/// # Errors
///
/// Returns [`LedgerError`] if a collection cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/reports/routes",
    tag = "Reports",
    summary = "Bookings per route",
    description = "One entry per stored route in route order, with its bookings and count. Bookings of deleted routes are not included.",
    responses(
        (status = 200, description = "Route report", body = RouteReportResponse),
    )
)]
pub async fn route_report(State(state): State<AppState>) -> Result<impl IntoResponse, LedgerError> {
    let report = state.ledger_service.build_route_report().await?;
    Ok(Json(RouteReportResponse::from(&report)))
}

/// `GET /reports/feedback` — All feedback, oldest first.
///
/// # Errors
///
/// Returns [`LedgerError`] if the feedback collection cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/reports/feedback",
    tag = "Reports",
    summary = "Feedback report",
    responses(
        (status = 200, description = "Feedback in insertion order", body = Vec<FeedbackResponse>),
    )
)]
pub async fn feedback_report(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, LedgerError> {
    let feedback = state.ledger_service.build_feedback_report().await?;
    let data: Vec<FeedbackResponse> = feedback.iter().map(FeedbackResponse::from).collect();
    Ok(Json(data))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/routes", get(route_report))
        .route("/reports/feedback", get(feedback_report))
}
