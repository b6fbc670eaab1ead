//! Bookable route with fixed time slots and seat capacity.

use serde::{Deserialize, Deserializer, Serialize};

use super::RecordId;
use crate::error::LedgerError;

/// Whether a route still accepts bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// `booked < seats`.
    Open,
    /// `booked >= seats`. There is no transition back.
    Full,
}

/// A transport route as persisted in the `routes` collection.
///
/// `seats` is fixed at creation. `booked` only ever grows, one step per
/// successful booking, and never exceeds `seats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route identifier (immutable after creation).
    pub id: RecordId,
    /// Display title, never empty.
    pub title: String,
    /// Optional display description.
    #[serde(default)]
    pub desc: String,
    /// Ordered, non-empty list of time slots. Older records store the raw
    /// comma separated string; it is split on read.
    #[serde(deserialize_with = "times_from_list_or_string")]
    pub times: Vec<String>,
    /// Total seat capacity.
    pub seats: u32,
    /// Seats booked so far.
    #[serde(default)]
    pub booked: u32,
}

impl Route {
    /// Builds a new route from raw form input.
    ///
    /// `raw_times` is a comma separated list; pieces are trimmed and empty
    /// pieces dropped. The new route starts with `booked = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if the title is empty, no time
    /// slot survives parsing, or `seats` is not a positive integer.
    pub fn new(title: &str, desc: &str, raw_times: &str, seats: i64) -> Result<Self, LedgerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::Validation("title is required".to_string()));
        }

        let times = parse_times(raw_times);
        if times.is_empty() {
            return Err(LedgerError::Validation(
                "at least one time slot is required".to_string(),
            ));
        }

        let seats = u32::try_from(seats)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                LedgerError::Validation(format!("seats must be a positive integer, got {seats}"))
            })?;

        Ok(Self {
            id: RecordId::generate(),
            title: title.to_string(),
            desc: desc.trim().to_string(),
            times,
            seats,
            booked: 0,
        })
    }

    /// Returns the current lifecycle state of the route.
    #[must_use]
    pub const fn status(&self) -> RouteStatus {
        if self.booked >= self.seats {
            RouteStatus::Full
        } else {
            RouteStatus::Open
        }
    }

    /// Returns `true` when no seats are left.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self.status(), RouteStatus::Full)
    }

    /// Returns the number of seats still available.
    #[must_use]
    pub const fn seats_left(&self) -> u32 {
        self.seats.saturating_sub(self.booked)
    }
}

/// Splits a comma separated time list, trimming entries and dropping
/// empty ones.
#[must_use]
pub fn parse_times(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn times_from_list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredTimes {
        List(Vec<String>),
        Raw(String),
    }

    Ok(match StoredTimes::deserialize(deserializer)? {
        StoredTimes::List(times) => times,
        StoredTimes::Raw(raw) => parse_times(&raw),
    })
}
