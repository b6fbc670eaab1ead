//! # route-ledger
//!
//! Local booking ledger for transport routes.
//!
//! An admin defines routes (title, description, time slots, seat capacity),
//! users reserve seats on a route and time slot, and reports aggregate
//! bookings per route and list free-text feedback. All state lives in a
//! local key-value store holding one JSON blob per collection and is
//! re-read on every operation.
//!
//! The one invariant the ledger protects is `booked <= seats` for every
//! route.
//!
//! ## Architecture
//!
//! ```text
//! UI (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── LedgerService (service/)
//!     ├── EventBus, RouteLocks (domain/)
//!     │
//!     ├── LedgerStore (persistence/)
//!     │
//!     └── KeyValueStore: FileStore | MemoryStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
