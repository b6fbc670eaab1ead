//! Route management handlers: create, list, delete, time slots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::api::dto::{CreateRouteRequest, RouteResponse, RouteTimesResponse};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::RecordId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /routes` — Create a new route.
///
/// # Errors
///
/// Returns [`LedgerError::Validation`] for an empty title, no time slots,
/// or a non-positive seat count.
#[utoipa::path(
    post,
    path = "/api/v1/routes",
    tag = "Routes",
    summary = "Create a route",
    description = "Creates a route from a title, optional description, a comma separated list of time slots, and a seat capacity.",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Route created", body = RouteResponse),
        (status = 400, description = "Invalid route", body = ErrorResponse),
    )
)]
pub async fn create_route(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateRouteRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let route = state
        .ledger_service
        .create_route(&req.title, &req.desc, &req.times, req.seats)
        .await?;
    Ok((StatusCode::CREATED, Json(RouteResponse::from(&route))))
}

/// `GET /routes` — List all routes in stored order.
///
/// # Errors
///
/// Returns [`LedgerError`] if the routes collection cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/routes",
    tag = "Routes",
    summary = "List routes",
    responses(
        (status = 200, description = "All routes", body = Vec<RouteResponse>),
    )
)]
pub async fn list_routes(State(state): State<AppState>) -> Result<impl IntoResponse, LedgerError> {
    let routes = state.ledger_service.list_routes().await?;
    let data: Vec<RouteResponse> = routes.iter().map(RouteResponse::from).collect();
    Ok(Json(data))
}

/// `DELETE /routes/{id}` — Delete a route.
///
/// Always answers 204, also for unknown ids. Existing bookings are kept.
///
/// # Errors
///
/// Returns [`LedgerError`] on storage failure.
#[utoipa::path(
    delete,
    path = "/api/v1/routes/{id}",
    tag = "Routes",
    summary = "Delete a route",
    params(
        ("id" = String, Path, description = "Route id"),
    ),
    responses(
        (status = 204, description = "Route deleted or already absent"),
    )
)]
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, LedgerError> {
    state
        .ledger_service
        .delete_route(&RecordId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /routes/{id}/times` — Time slots of a route.
///
/// # Errors
///
/// Returns [`LedgerError::RouteNotFound`] if the route does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/routes/{id}/times",
    tag = "Routes",
    summary = "List a route's time slots",
    params(
        ("id" = String, Path, description = "Route id"),
    ),
    responses(
        (status = 200, description = "Time slots", body = RouteTimesResponse),
        (status = 404, description = "Route not found", body = ErrorResponse),
    )
)]
pub async fn route_times(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, LedgerError> {
    let route_id = RecordId::from(id);
    let times = state.ledger_service.route_times(&route_id).await?;
    Ok(Json(RouteTimesResponse {
        route_id: route_id.to_string(),
        times,
    }))
}

/// Route management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/{id}", delete(delete_route))
        .route("/routes/{id}/times", get(route_times))
}
