//! Per-route mutation locks.
//!
//! [`RouteLocks`] hands out one exclusive [`tokio::sync::Mutex`] per route
//! id. A booking holds its route's lock across the whole
//! read-check-append-increment sequence, so two bookings on the same route
//! can never both pass the capacity check for the last seat. Bookings on
//! different routes proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::RecordId;

/// Registry of per-route locks, created lazily on first use.
#[derive(Debug, Default)]
pub struct RouteLocks {
    locks: RwLock<HashMap<RecordId, Arc<Mutex<()>>>>,
}

impl RouteLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the exclusive lock for `route_id`, waiting if another task
    /// holds it. The lock is released when the guard is dropped.
    pub async fn acquire(&self, route_id: &RecordId) -> OwnedMutexGuard<()> {
        let existing = self.locks.read().await.get(route_id).map(Arc::clone);
        let lock = match existing {
            Some(lock) => lock,
            None => {
                let mut map = self.locks.write().await;
                Arc::clone(
                    map.entry(route_id.clone())
                        .or_insert_with(|| Arc::new(Mutex::new(()))),
                )
            }
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry for a deleted route. Holders of a guard keep
    /// their lock until they release it.
    pub async fn forget(&self, route_id: &RecordId) {
        self.locks.write().await.remove(route_id);
    }

    /// Returns the number of routes with a lock entry.
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    /// Returns `true` if no lock entry exists.
    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_route_is_exclusive() {
        let locks = RouteLocks::new();
        let id = RecordId::from("r1");

        let guard = locks.acquire(&id).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&id)).await;
        assert!(second.is_err());

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&id)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn different_routes_do_not_block() {
        let locks = RouteLocks::new();
        let _a = locks.acquire(&RecordId::from("a")).await;
        let b = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(&RecordId::from("b")),
        )
        .await;
        assert!(b.is_ok());
        assert_eq!(locks.len().await, 2);
    }

    #[tokio::test]
    async fn forget_removes_entry() {
        let locks = RouteLocks::new();
        let id = RecordId::from("r1");
        drop(locks.acquire(&id).await);
        locks.forget(&id).await;
        assert!(locks.is_empty().await);
    }
}
