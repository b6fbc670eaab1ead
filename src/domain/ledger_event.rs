//! Domain events reflecting ledger mutations.
//!
//! Every successful mutation emits a [`LedgerEvent`] through the
//! [`super::EventBus`]. Events are forwarded to WebSocket subscribers so
//! that views can re-render.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RecordId;

/// Domain event emitted after every committed mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Emitted when a route is created.
    RouteCreated {
        /// Route identifier.
        route_id: RecordId,
        /// Route title.
        title: String,
        /// Total capacity.
        seats: u32,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a route is removed. Deleting an unknown id emits
    /// nothing.
    RouteDeleted {
        /// Route identifier.
        route_id: RecordId,
        /// Deletion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a booking was recorded.
    SeatBooked {
        /// Route identifier.
        route_id: RecordId,
        /// New booking identifier.
        booking_id: RecordId,
        /// Booked time slot.
        time: String,
        /// Seats booked after this booking.
        booked: u32,
        /// Total capacity.
        seats: u32,
        /// Booking timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a booking takes the last seat of a route.
    RouteFull {
        /// Route identifier.
        route_id: RecordId,
        /// Timestamp of the transition.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after feedback is submitted.
    FeedbackSubmitted {
        /// Feedback identifier.
        feedback_id: RecordId,
        /// Submission timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Returns the route this event concerns, if any.
    #[must_use]
    pub const fn route_id(&self) -> Option<&RecordId> {
        match self {
            Self::RouteCreated { route_id, .. }
            | Self::RouteDeleted { route_id, .. }
            | Self::SeatBooked { route_id, .. }
            | Self::RouteFull { route_id, .. } => Some(route_id),
            Self::FeedbackSubmitted { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::RouteCreated { .. } => "route_created",
            Self::RouteDeleted { .. } => "route_deleted",
            Self::SeatBooked { .. } => "seat_booked",
            Self::RouteFull { .. } => "route_full",
            Self::FeedbackSubmitted { .. } => "feedback_submitted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_booked_serializes_with_tag() {
        let event = LedgerEvent::SeatBooked {
            route_id: RecordId::from("r1"),
            booking_id: RecordId::from("b1"),
            time: "9am".to_string(),
            booked: 1,
            seats: 2,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"seat_booked\""));
        assert!(json.contains("\"route_id\":\"r1\""));
        assert_eq!(event.event_type_str(), "seat_booked");
    }

    #[test]
    fn feedback_event_has_no_route() {
        let event = LedgerEvent::FeedbackSubmitted {
            feedback_id: RecordId::from("f1"),
            timestamp: Utc::now(),
        };
        assert!(event.route_id().is_none());
    }
}
