//! Per-connection subscription manager.
//!
//! Tracks which route ids a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::{LedgerEvent, RecordId};

/// Manages the set of route subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed route ids. If `subscribe_all` is true, this set is ignored.
    route_ids: HashSet<RecordId>,
    /// Whether the client subscribes to everything (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds route ids to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, ids: &[String]) {
        for id in ids {
            if id == "*" {
                self.subscribe_all = true;
            } else if !id.trim().is_empty() {
                self.route_ids.insert(RecordId::from(id.as_str()));
            }
        }
    }

    /// Removes route ids from the subscription set. `"*"` clears the
    /// wildcard.
    pub fn unsubscribe(&mut self, ids: &[String]) {
        for id in ids {
            if id == "*" {
                self.subscribe_all = false;
            } else {
                self.route_ids.remove(&RecordId::from(id.as_str()));
            }
        }
    }

    /// Returns `true` if the event passes the subscription filter.
    /// Events without a route only reach wildcard subscribers.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        if self.subscribe_all {
            return true;
        }
        event
            .route_id()
            .is_some_and(|id| self.route_ids.contains(id))
    }

    /// Returns the number of explicitly subscribed route ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.route_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub const fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn deleted(id: &str) -> LedgerEvent {
        LedgerEvent::RouteDeleted {
            route_id: RecordId::from(id),
            timestamp: Utc::now(),
        }
    }

    fn feedback() -> LedgerEvent {
        LedgerEvent::FeedbackSubmitted {
            feedback_id: RecordId::from("f1"),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(&deleted("r1")));
        assert!(!mgr.matches(&feedback()));
    }

    #[test]
    fn subscribe_specific_route() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["r1".to_string()]);
        assert!(mgr.matches(&deleted("r1")));
        assert!(!mgr.matches(&deleted("r2")));
        assert!(!mgr.matches(&feedback()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["*".to_string()]);
        assert!(mgr.is_subscribed_all());
        assert!(mgr.matches(&deleted("any")));
        assert!(mgr.matches(&feedback()));
    }

    #[test]
    fn unsubscribe_removes_route() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["r1".to_string(), "r2".to_string()]);
        assert_eq!(mgr.count(), 2);
        mgr.unsubscribe(&["r1".to_string()]);
        assert!(!mgr.matches(&deleted("r1")));
        assert_eq!(mgr.count(), 1);
    }
}
