//! Route DTOs for create, list and time-slot lookups.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{Route, RouteStatus};

/// Request body for `POST /routes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRouteRequest {
    /// Route title.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub desc: String,
    /// Comma separated time slots, e.g. `"9am, 10am"`.
    #[serde(default)]
    pub times: String,
    /// Total seat capacity, as a number or a numeric form string.
    #[serde(default, deserialize_with = "seats_from_form")]
    pub seats: i64,
}

fn seats_from_form<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FormSeats {
        Number(i64),
        Text(String),
    }

    match FormSeats::deserialize(deserializer)? {
        FormSeats::Number(n) => Ok(n),
        FormSeats::Text(raw) => raw.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("seats must be a positive integer, got `{raw}`"))
        }),
    }
}

/// Route representation returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteResponse {
    /// Route identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display description.
    pub desc: String,
    /// Time slots in order.
    pub times: Vec<String>,
    /// Total capacity.
    pub seats: u32,
    /// Seats booked so far.
    pub booked: u32,
    /// Seats still available.
    pub seats_left: u32,
    /// `"open"` or `"full"`.
    pub status: String,
}

impl From<&Route> for RouteResponse {
    fn from(route: &Route) -> Self {
        let status = match route.status() {
            RouteStatus::Open => "open",
            RouteStatus::Full => "full",
        };
        Self {
            id: route.id.to_string(),
            title: route.title.clone(),
            desc: route.desc.clone(),
            times: route.times.clone(),
            seats: route.seats,
            booked: route.booked,
            seats_left: route.seats_left(),
            status: status.to_string(),
        }
    }
}

/// Response body for `GET /routes/{id}/times`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteTimesResponse {
    /// Route identifier.
    pub route_id: String,
    /// Bookable time slots.
    pub times: Vec<String>,
}
