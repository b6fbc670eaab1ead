//! Booking DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::Booking;

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookSeatRequest {
    /// Route to book.
    #[serde(default)]
    pub route_id: String,
    /// Chosen time slot.
    #[serde(default)]
    pub time: String,
    /// Passenger name.
    #[serde(default)]
    pub name: String,
    /// Passenger email.
    #[serde(default)]
    pub email: String,
}

/// Booking representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    /// Booking identifier.
    pub id: String,
    /// Passenger name.
    pub name: String,
    /// Passenger email.
    pub email: String,
    /// Booked route id (may no longer exist).
    pub route_id: String,
    /// Route title at booking time.
    pub route_title: String,
    /// Booked time slot.
    pub time: String,
    /// Human-readable booking date.
    pub date: String,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            name: booking.name.clone(),
            email: booking.email.clone(),
            route_id: booking.route_id.to_string(),
            route_title: booking.route_title.clone(),
            time: booking.time.clone(),
            date: booking.date.clone(),
        }
    }
}

/// Paginated list response for `GET /bookings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    /// Bookings on this page.
    pub data: Vec<BookingResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
