//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::{KeyValueStore, LedgerStore};
use crate::service::LedgerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ledger service for all business logic.
    pub ledger_service: Arc<LedgerService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires a service and event bus over the given storage backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, strict_decode: bool, event_bus_capacity: usize) -> Self {
        let event_bus = EventBus::new(event_bus_capacity);
        let store = LedgerStore::new(backend).with_strict_decode(strict_decode);
        let ledger_service = Arc::new(LedgerService::new(store, event_bus.clone()));
        Self {
            ledger_service,
            event_bus,
        }
    }
}
