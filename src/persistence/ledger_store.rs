//! Typed access to the ledger collections.
//!
//! [`LedgerStore`] reads and writes whole collections: every read decodes
//! the full blob, every write re-serializes the full sequence. There is no
//! partial update. Read-modify-write sequences on one collection are
//! serialized by a per-collection mutex, so concurrent appends inside one
//! process never drop each other's records.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::{Collection, KeyValueStore};
use crate::domain::{Booking, Feedback, RecordId, Route};
use crate::error::LedgerError;

/// One write mutex per collection.
#[derive(Debug, Default)]
struct CollectionLocks {
    routes: Mutex<()>,
    bookings: Mutex<()>,
    feedbacks: Mutex<()>,
    users: Mutex<()>,
}

impl CollectionLocks {
    const fn get(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Routes => &self.routes,
            Collection::Bookings => &self.bookings,
            Collection::Feedbacks => &self.feedbacks,
            Collection::Users => &self.users,
        }
    }
}

/// Store access layer over an injected [`KeyValueStore`].
///
/// Absent collections read as empty. On list operations a corrupt blob
/// also reads as empty (logged at warn) unless strict decoding is enabled,
/// in which case it surfaces as [`LedgerError::Decode`]. Mutations always
/// fail with [`LedgerError::Decode`] on a corrupt blob and leave it as is.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    backend: Arc<dyn KeyValueStore>,
    locks: Arc<CollectionLocks>,
    strict_decode: bool,
}

impl LedgerStore {
    /// Creates a store over `backend` with lenient decoding.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            locks: Arc::new(CollectionLocks::default()),
            strict_decode: false,
        }
    }

    /// Enables or disables strict decoding of stored blobs.
    #[must_use]
    pub const fn with_strict_decode(mut self, strict: bool) -> Self {
        self.strict_decode = strict;
        self
    }

    /// Returns the raw backend.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    // ── Routes ──────────────────────────────────────────────────────────

    /// Returns all stored routes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the backend fails or, with strict
    /// decoding, the blob is corrupt.
    pub async fn list_routes(&self) -> Result<Vec<Route>, LedgerError> {
        self.read(Collection::Routes).await
    }

    /// Appends a route and persists the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn add_route(&self, route: &Route) -> Result<(), LedgerError> {
        self.append(Collection::Routes, route).await
    }

    /// Removes the route with `id`. Returns whether a route was removed;
    /// an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn delete_route(&self, id: &RecordId) -> Result<bool, LedgerError> {
        self.modify(Collection::Routes, |routes: &mut Vec<Route>| {
            let before = routes.len();
            routes.retain(|r| &r.id != id);
            routes.len() != before
        })
        .await
    }

    /// Increments `booked` on the route with `id` and persists. Returns the
    /// updated route, or `None` without writing if the route is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn increment_booked(&self, id: &RecordId) -> Result<Option<Route>, LedgerError> {
        let mut updated = None;
        self.modify(Collection::Routes, |routes: &mut Vec<Route>| {
            if let Some(route) = routes.iter_mut().find(|r| &r.id == id) {
                route.booked = route.booked.saturating_add(1);
                updated = Some(route.clone());
                true
            } else {
                false
            }
        })
        .await?;
        Ok(updated)
    }

    // ── Bookings ────────────────────────────────────────────────────────

    /// Returns all stored bookings in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the backend fails or, with strict
    /// decoding, the blob is corrupt.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, LedgerError> {
        self.read(Collection::Bookings).await
    }

    /// Appends a booking and persists the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn add_booking(&self, booking: &Booking) -> Result<(), LedgerError> {
        self.append(Collection::Bookings, booking).await
    }

    // ── Feedback ────────────────────────────────────────────────────────

    /// Returns all stored feedback in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the backend fails or, with strict
    /// decoding, the blob is corrupt.
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, LedgerError> {
        self.read(Collection::Feedbacks).await
    }

    /// Appends a feedback entry and persists the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn add_feedback(&self, feedback: &Feedback) -> Result<(), LedgerError> {
        self.append(Collection::Feedbacks, feedback).await
    }

    // ── Users (legacy) ──────────────────────────────────────────────────

    /// Returns the legacy user records, shape unconstrained.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the backend fails or, with strict
    /// decoding, the blob is corrupt.
    pub async fn list_users(&self) -> Result<Vec<serde_json::Value>, LedgerError> {
        self.read(Collection::Users).await
    }

    /// Appends a legacy user record.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read or written.
    pub async fn add_user(&self, user: &serde_json::Value) -> Result<(), LedgerError> {
        self.append(Collection::Users, user).await
    }

    // ── Collection plumbing ─────────────────────────────────────────────

    /// Lenient or strict read, depending on the store's decode mode.
    async fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, LedgerError> {
        match self.load(collection).await {
            Err(err @ LedgerError::Decode { .. }) if !self.strict_decode => {
                tracing::warn!(%collection, error = %err, "undecodable collection, reading as empty");
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Always strict: a blob that does not decode is an error.
    async fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, LedgerError> {
        let Some(blob) = self.backend.get(collection.key()).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<T>>(&blob).map_err(|err| LedgerError::Decode {
            collection: collection.key(),
            message: err.to_string(),
        })
    }

    async fn write<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), LedgerError> {
        let blob = serde_json::to_string(items).map_err(|e| LedgerError::Internal(e.to_string()))?;
        self.backend.put(collection.key(), blob).await
    }

    async fn append<T>(&self, collection: Collection, item: &T) -> Result<(), LedgerError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        self.modify(collection, |items: &mut Vec<T>| {
            items.push(item.clone());
            true
        })
        .await
        .map(|_| ())
    }

    /// Read-modify-write under the collection's mutex. `apply` returns
    /// whether the collection changed; unchanged collections are not
    /// written back. The read is strict in every decode mode: a blob that
    /// does not decode is never replaced.
    async fn modify<T, F>(&self, collection: Collection, apply: F) -> Result<bool, LedgerError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let _guard = self.locks.get(collection).lock().await;
        let mut items = self.load::<T>(collection).await?;
        let changed = apply(&mut items);
        if changed {
            self.write(collection, &items).await?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn store() -> LedgerStore {
        LedgerStore::new(Arc::new(MemoryStore::new()))
    }

    fn route(title: &str, seats: i64) -> Route {
        let Ok(route) = Route::new(title, "", "9am, 10am", seats) else {
            panic!("route should be valid");
        };
        route
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = store();
        assert!(store.list_routes().await.is_ok_and(|r| r.is_empty()));
        assert!(store.list_bookings().await.is_ok_and(|b| b.is_empty()));
        assert!(store.list_feedback().await.is_ok_and(|f| f.is_empty()));
        assert!(store.list_users().await.is_ok_and(|u| u.is_empty()));
    }

    #[tokio::test]
    async fn added_route_is_listed_once() {
        let store = store();
        let first = route("A", 2);
        let second = route("B", 3);
        assert!(store.add_route(&first).await.is_ok());
        assert!(store.add_route(&second).await.is_ok());

        let Ok(routes) = store.list_routes().await else {
            panic!("list routes");
        };
        assert_eq!(routes, vec![first.clone(), second]);
        assert_eq!(routes.iter().filter(|r| **r == first).count(), 1);
    }

    #[tokio::test]
    async fn delete_route_is_idempotent() {
        let store = store();
        let keep = route("Keep", 2);
        let drop_me = route("Drop", 2);
        assert!(store.add_route(&keep).await.is_ok());
        assert!(store.add_route(&drop_me).await.is_ok());

        assert!(matches!(store.delete_route(&drop_me.id).await, Ok(true)));
        let Ok(once) = store.list_routes().await else {
            panic!("list routes");
        };
        assert!(matches!(store.delete_route(&drop_me.id).await, Ok(false)));
        let Ok(twice) = store.list_routes().await else {
            panic!("list routes");
        };
        assert_eq!(once, twice);
        assert_eq!(twice, vec![keep]);
    }

    #[tokio::test]
    async fn increment_booked_updates_matching_route() {
        let store = store();
        let r = route("A", 2);
        assert!(store.add_route(&r).await.is_ok());

        let Ok(Some(updated)) = store.increment_booked(&r.id).await else {
            panic!("route should be incremented");
        };
        assert_eq!(updated.booked, 1);
        let booked = store
            .list_routes()
            .await
            .ok()
            .and_then(|routes| routes.first().map(|r| r.booked));
        assert_eq!(booked, Some(1));
    }

    #[tokio::test]
    async fn increment_booked_on_missing_route_is_a_no_op() {
        let store = store();
        let result = store.increment_booked(&RecordId::from("missing")).await;
        assert!(matches!(result, Ok(None)));
        assert!(matches!(store.backend().get("routes").await, Ok(None)));
    }

    #[tokio::test]
    async fn corrupt_blob_reads_as_empty_by_default() {
        let store = LedgerStore::new(Arc::new(MemoryStore::with_blobs([(
            "routes",
            "{not json",
        )])));
        assert!(store.list_routes().await.is_ok_and(|r| r.is_empty()));
    }

    #[tokio::test]
    async fn corrupt_blob_is_an_error_when_strict() {
        let store = LedgerStore::new(Arc::new(MemoryStore::with_blobs([(
            "bookings",
            "[{\"id\":1}]",
        )])))
        .with_strict_decode(true);
        let result = store.list_bookings().await;
        assert!(matches!(
            result,
            Err(LedgerError::Decode {
                collection: "bookings",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn stored_layout_matches_wire_shape() {
        let store = store();
        let r = route("A", 2);
        let booking = Booking::new(&r, "9am", "Ada", "ada@example.com");
        assert!(store.add_booking(&booking).await.is_ok());

        let Ok(Some(blob)) = store.backend().get("bookings").await else {
            panic!("bookings blob");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&blob) else {
            panic!("blob is json");
        };
        let Some(first) = value.as_array().and_then(|a| a.first()) else {
            panic!("blob is a non-empty array");
        };
        assert_eq!(first.get("routeTitle").and_then(|v| v.as_str()), Some("A"));
    }

    #[tokio::test]
    async fn legacy_users_pass_through() {
        let store = store();
        let user = serde_json::json!({"name": "Ada", "role": "admin"});
        assert!(store.add_user(&user).await.is_ok());
        assert!(store.list_users().await.is_ok_and(|u| u == vec![user]));
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let store = store();
        let r = route("A", 50);
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let booking = Booking::new(&r, "9am", &format!("p{i}"), "p@example.com");
            handles.push(tokio::spawn(async move { store.add_booking(&booking).await }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(Ok(()))));
        }
        assert!(store.list_bookings().await.is_ok_and(|b| b.len() == 20));
    }

    #[tokio::test]
    async fn corrupt_blob_is_never_overwritten() {
        let store = LedgerStore::new(Arc::new(MemoryStore::with_blobs([(
            "routes",
            "{not json",
        )])));
        let result = store.add_route(&route("New", 2)).await;
        assert!(matches!(
            result,
            Err(LedgerError::Decode {
                collection: "routes",
                ..
            })
        ));
        assert!(matches!(
            store.backend().get("routes").await,
            Ok(Some(blob)) if blob == "{not json"
        ));
    }

    #[tokio::test]
    async fn mixed_legacy_routes_survive_an_append() {
        let seeded = r#"[
            {"id":"1","title":"Legacy","desc":"","times":"8am, 9am","seats":3,"booked":0},
            {"id":"2","title":"Good","desc":"","times":["10am"],"seats":2,"booked":1}
        ]"#;
        let store = LedgerStore::new(Arc::new(MemoryStore::with_blobs([("routes", seeded)])));
        assert!(store.list_routes().await.is_ok_and(|r| r.len() == 2));

        assert!(store.add_route(&route("New", 2)).await.is_ok());

        let Ok(routes) = store.list_routes().await else {
            panic!("list routes");
        };
        let summary: Vec<(&str, u32)> = routes.iter().map(|r| (r.title.as_str(), r.booked)).collect();
        assert_eq!(summary, vec![("Legacy", 0), ("Good", 1), ("New", 0)]);
        assert_eq!(
            routes.first().map(|r| r.times.clone()),
            Some(vec!["8am".to_string(), "9am".to_string()])
        );
    }
}
