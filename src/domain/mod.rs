//! Domain layer: typed records, report aggregation, and the event system.
//!
//! This module contains the ledger's record types (routes, bookings,
//! feedback), the per-route report builder, the event bus for broadcasting
//! committed mutations, and the per-route lock registry.

pub mod booking;
pub mod event_bus;
pub mod feedback;
pub mod ledger_event;
pub mod record_id;
pub mod report;
pub mod route;
pub mod route_locks;

pub use booking::Booking;
pub use event_bus::EventBus;
pub use feedback::Feedback;
pub use ledger_event::LedgerEvent;
pub use record_id::RecordId;
pub use report::{ChartPoint, RouteReport, RouteReportEntry, build_route_report};
pub use route::{Route, RouteStatus, parse_times};
pub use route_locks::RouteLocks;
