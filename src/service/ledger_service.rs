//! Ledger service: route management, seat booking, and reporting.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    Booking, EventBus, Feedback, LedgerEvent, RecordId, Route, RouteLocks, RouteReport,
    build_route_report,
};
use crate::error::LedgerError;
use crate::persistence::LedgerStore;

/// Orchestration layer for all ledger operations.
///
/// Owns the [`LedgerStore`] for state, a [`RouteLocks`] registry that
/// serializes bookings per route, and the [`EventBus`] for notifications.
/// Every operation re-reads the collections it needs; nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct LedgerService {
    store: LedgerStore,
    route_locks: Arc<RouteLocks>,
    event_bus: EventBus,
}

impl LedgerService {
    /// Creates a new `LedgerService`.
    #[must_use]
    pub fn new(store: LedgerStore, event_bus: EventBus) -> Self {
        Self {
            store,
            route_locks: Arc::new(RouteLocks::new()),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`LedgerStore`].
    #[must_use]
    pub const fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Creates a route from raw form input and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] for an empty title, an empty
    /// time list or a non-positive seat count; nothing is written then.
    /// Storage failures are propagated.
    pub async fn create_route(
        &self,
        title: &str,
        desc: &str,
        raw_times: &str,
        seats: i64,
    ) -> Result<Route, LedgerError> {
        let route = Route::new(title, desc, raw_times, seats)?;
        self.store.add_route(&route).await?;

        let _ = self.event_bus.publish(LedgerEvent::RouteCreated {
            route_id: route.id.clone(),
            title: route.title.clone(),
            seats: route.seats,
            timestamp: Utc::now(),
        });

        tracing::info!(route_id = %route.id, title = %route.title, seats = route.seats, "route created");
        Ok(route)
    }

    /// Deletes a route. Deleting an unknown id succeeds.
    ///
    /// Bookings that reference the route are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] on storage failure.
    pub async fn delete_route(&self, route_id: &RecordId) -> Result<(), LedgerError> {
        let removed = {
            let _guard = self.route_locks.acquire(route_id).await;
            self.store.delete_route(route_id).await?
        };
        self.route_locks.forget(route_id).await;

        if removed {
            let _ = self.event_bus.publish(LedgerEvent::RouteDeleted {
                route_id: route_id.clone(),
                timestamp: Utc::now(),
            });
        }

        tracing::info!(%route_id, removed, "route deleted");
        Ok(())
    }

    /// Books one seat on `route_id` at `time`.
    ///
    /// Checks run in order and all of them before any write: missing
    /// fields, unknown route, no seats left. On success the booking is
    /// appended and then the route counter incremented. These two writes
    /// are not transactional: if the increment fails, the booking stays
    /// recorded and the counter lags behind by one.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`], [`LedgerError::RouteNotFound`]
    /// or [`LedgerError::SoldOut`] for rejected bookings, and storage
    /// errors as they occur.
    pub async fn book_seat(
        &self,
        route_id: &RecordId,
        time: &str,
        name: &str,
        email: &str,
    ) -> Result<Booking, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(LedgerError::MissingField("email"));
        }
        if route_id.is_blank() {
            return Err(LedgerError::MissingField("routeId"));
        }
        if time.trim().is_empty() {
            return Err(LedgerError::MissingField("time"));
        }

        let guard = self.route_locks.acquire(route_id).await;

        let routes = self.store.list_routes().await?;
        let Some(route) = routes.iter().find(|r| &r.id == route_id) else {
            // Unknown ids must not leave a lock entry behind.
            drop(guard);
            self.route_locks.forget(route_id).await;
            return Err(LedgerError::RouteNotFound(route_id.clone()));
        };

        if route.is_full() {
            tracing::debug!(%route_id, booked = route.booked, seats = route.seats, "booking rejected, route full");
            return Err(LedgerError::SoldOut {
                route_id: route_id.clone(),
                seats: route.seats,
            });
        }

        let booking = Booking::new(route, time, name, email);
        self.store.add_booking(&booking).await?;

        let updated = self.store.increment_booked(route_id).await?;
        let (booked, seats) = match &updated {
            Some(r) => (r.booked, r.seats),
            None => {
                tracing::warn!(%route_id, booking_id = %booking.id, "route vanished before seat count increment");
                (route.booked, route.seats)
            }
        };

        let _ = self.event_bus.publish(LedgerEvent::SeatBooked {
            route_id: route_id.clone(),
            booking_id: booking.id.clone(),
            time: booking.time.clone(),
            booked,
            seats,
            timestamp: Utc::now(),
        });
        if updated.as_ref().is_some_and(Route::is_full) {
            let _ = self.event_bus.publish(LedgerEvent::RouteFull {
                route_id: route_id.clone(),
                timestamp: Utc::now(),
            });
        }

        tracing::info!(%route_id, booking_id = %booking.id, booked, seats, "seat booked");
        Ok(booking)
    }

    /// Builds the per-route booking report from the current collections.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if a collection cannot be read.
    pub async fn build_route_report(&self) -> Result<RouteReport, LedgerError> {
        let routes = self.store.list_routes().await?;
        let bookings = self.store.list_bookings().await?;
        Ok(build_route_report(&routes, &bookings))
    }

    /// Returns all feedback in insertion order, newest last.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read.
    pub async fn build_feedback_report(&self) -> Result<Vec<Feedback>, LedgerError> {
        self.store.list_feedback().await
    }

    /// Records a feedback submission.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] for blank feedback text, and
    /// storage errors as they occur.
    pub async fn submit_feedback(
        &self,
        name: &str,
        email: &str,
        text: &str,
    ) -> Result<Feedback, LedgerError> {
        let feedback = Feedback::new(name, email, text)?;
        self.store.add_feedback(&feedback).await?;

        let _ = self.event_bus.publish(LedgerEvent::FeedbackSubmitted {
            feedback_id: feedback.id.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(feedback_id = %feedback.id, "feedback submitted");
        Ok(feedback)
    }

    /// Returns all routes in stored order.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read.
    pub async fn list_routes(&self) -> Result<Vec<Route>, LedgerError> {
        self.store.list_routes().await
    }

    /// Returns the time slots of a route, for the booking form.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RouteNotFound`] if the route does not exist.
    pub async fn route_times(&self, route_id: &RecordId) -> Result<Vec<String>, LedgerError> {
        self.store
            .list_routes()
            .await?
            .into_iter()
            .find(|r| &r.id == route_id)
            .map(|r| r.times)
            .ok_or_else(|| LedgerError::RouteNotFound(route_id.clone()))
    }

    /// Returns all bookings in insertion order, orphaned ones included.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the collection cannot be read.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, LedgerError> {
        self.store.list_bookings().await
    }
}
