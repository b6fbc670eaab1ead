//! Seat reservation against one route and time slot.

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{RecordId, Route};

/// A booking as persisted in the `bookings` collection.
///
/// `route_id` is a weak reference: the route may be deleted later and the
/// booking stays. `route_title` is copied at booking time for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    pub id: RecordId,
    /// Passenger name.
    pub name: String,
    /// Passenger email.
    pub email: String,
    /// Id of the booked route.
    pub route_id: RecordId,
    /// Route title at booking time.
    pub route_title: String,
    /// Booked time slot.
    pub time: String,
    /// Human-readable creation timestamp.
    pub date: String,
}

impl Booking {
    /// Creates a booking for `route`, stamped with the current local time.
    ///
    /// Field presence is checked by the caller; this constructor only
    /// trims and denormalizes.
    #[must_use]
    pub fn new(route: &Route, time: &str, name: &str, email: &str) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            route_id: route.id.clone(),
            route_title: route.title.clone(),
            time: time.trim().to_string(),
            date: display_timestamp(),
        }
    }
}

/// Formats the current local time the way the ledger stores dates,
/// e.g. `3/14/2026, 9:05:12 AM`.
#[must_use]
pub fn display_timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
