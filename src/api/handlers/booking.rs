//! Booking handlers: book a seat, list bookings.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{BookSeatRequest, BookingListResponse, BookingResponse, PaginationParams};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::RecordId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /bookings` — Book one seat on a route.
///
/// # Errors
///
/// Returns [`LedgerError::MissingField`] (400), [`LedgerError::RouteNotFound`]
/// (404) or [`LedgerError::SoldOut`] (409).
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    summary = "Book a seat",
    description = "Books one seat on the given route and time slot if the route has capacity left.",
    request_body = BookSeatRequest,
    responses(
        (status = 201, description = "Seat booked", body = BookingResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 404, description = "Route not found", body = ErrorResponse),
        (status = 409, description = "No seats left", body = ErrorResponse),
    )
)]
pub async fn book_seat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BookSeatRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let booking = state
        .ledger_service
        .book_seat(&RecordId::from(req.route_id), &req.time, &req.name, &req.email)
        .await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(&booking))))
}

/// `GET /bookings` — List bookings with pagination, orphans included.
///
/// # Errors
///
/// Returns [`LedgerError`] if the bookings collection cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    summary = "List bookings",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated booking list", body = BookingListResponse),
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, LedgerError> {
    let bookings = state.ledger_service.list_bookings().await?;
    let (page, pagination) = params.paginate(bookings);
    Ok(Json(BookingListResponse {
        data: page.iter().map(BookingResponse::from).collect(),
        pagination,
    }))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(book_seat))
}
