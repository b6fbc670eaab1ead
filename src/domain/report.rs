//! Per-route booking aggregation for report and chart rendering.

use serde::Serialize;

use super::{Booking, Route};

/// One route together with the bookings that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteReportEntry {
    /// The route as currently stored.
    pub route: Route,
    /// Bookings whose `route_id` matches, in insertion order.
    pub bookings: Vec<Booking>,
    /// Number of matching bookings.
    pub count: usize,
}

/// Label/value pair for the bookings-per-route chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Route title.
    pub title: String,
    /// Number of bookings for the route.
    pub count: usize,
}

/// Report over all stored routes.
///
/// `entries` and `chart` are parallel: same length, same route order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    /// Detailed per-route entries.
    pub entries: Vec<RouteReportEntry>,
    /// Aggregate counts for charting, zero-count routes included.
    pub chart: Vec<ChartPoint>,
}

impl RouteReport {
    /// Total number of bookings attributed to existing routes.
    #[must_use]
    pub fn total_bookings(&self) -> usize {
        self.chart.iter().map(|p| p.count).sum()
    }
}

/// Groups `bookings` under the route they reference.
///
/// Counts come from the booking records, not from `Route::booked`.
/// Bookings whose route no longer exists do not appear.
#[must_use]
pub fn build_route_report(routes: &[Route], bookings: &[Booking]) -> RouteReport {
    let entries: Vec<RouteReportEntry> = routes
        .iter()
        .map(|route| {
            let matching: Vec<Booking> = bookings
                .iter()
                .filter(|b| b.route_id == route.id)
                .cloned()
                .collect();
            RouteReportEntry {
                route: route.clone(),
                count: matching.len(),
                bookings: matching,
            }
        })
        .collect();

    let chart = entries
        .iter()
        .map(|e| ChartPoint {
            title: e.route.title.clone(),
            count: e.count,
        })
        .collect();

    RouteReport { entries, chart }
}
