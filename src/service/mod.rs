//! Service layer: booking and reporting logic.
//!
//! [`LedgerService`] validates input, keeps seat counts consistent with
//! bookings, derives reports, and emits events through the
//! [`super::domain::EventBus`].

pub mod ledger_service;

pub use ledger_service::LedgerService;
