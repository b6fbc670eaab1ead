//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams ledger events so that views can
//! re-render after bookings, route changes and feedback submissions.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
