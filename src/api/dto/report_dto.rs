//! Report DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::booking_dto::BookingResponse;
use super::route_dto::RouteResponse;
use crate::domain::{RouteReport, RouteReportEntry};

/// One route with its bookings.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteReportEntryDto {
    /// The route.
    pub route: RouteResponse,
    /// Bookings referencing the route.
    pub bookings: Vec<BookingResponse>,
    /// Number of bookings.
    pub count: usize,
}

/// Chart data point.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartPointDto {
    /// Route title (chart label).
    pub title: String,
    /// Booking count (chart value).
    pub count: usize,
}

/// Response body for `GET /reports/routes`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteReportResponse {
    /// Per-route entries in route order.
    pub entries: Vec<RouteReportEntryDto>,
    /// Chart series, parallel to `entries`.
    pub chart: Vec<ChartPointDto>,
    /// Sum of all chart counts.
    pub total_bookings: usize,
}

impl From<&RouteReportEntry> for RouteReportEntryDto {
    fn from(entry: &RouteReportEntry) -> Self {
        Self {
            route: RouteResponse::from(&entry.route),
            bookings: entry.bookings.iter().map(BookingResponse::from).collect(),
            count: entry.count,
        }
    }
}

impl From<&RouteReport> for RouteReportResponse {
    fn from(report: &RouteReport) -> Self {
        Self {
            entries: report.entries.iter().map(RouteReportEntryDto::from).collect(),
            chart: report
                .chart
                .iter()
                .map(|p| ChartPointDto {
                    title: p.title.clone(),
                    count: p.count,
                })
                .collect(),
            total_bookings: report.total_bookings(),
        }
    }
}
