//! Persistence layer: named JSON blobs in a key-value store.
//!
//! Provides the [`KeyValueStore`] trait for the raw blob store and
//! [`LedgerStore`] for typed, whole-collection access on top of it. Two
//! backends ship with the crate: [`FileStore`] (one JSON file per
//! collection) and [`MemoryStore`] (process-local, used by tests and the
//! ephemeral mode).

pub mod file;
pub mod ledger_store;
pub mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::error::LedgerError;

pub use file::FileStore;
pub use ledger_store::LedgerStore;
pub use memory::MemoryStore;

/// Durable string-to-blob storage.
///
/// Each `put` replaces the whole value for its key in one step; readers
/// never observe a partially written value. The trait is async so that a
/// slower or remote backend can be substituted without touching callers.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Replaces the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the backend cannot be written.
    async fn put(&self, key: &str, value: String) -> Result<(), LedgerError>;
}

/// The independently persisted collections of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Bookable routes.
    Routes,
    /// Seat bookings.
    Bookings,
    /// Free-text feedback.
    Feedbacks,
    /// Legacy user records with no fixed shape.
    Users,
}

impl Collection {
    /// Returns the storage key of the collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Routes => "routes",
            Self::Bookings => "bookings",
            Self::Feedbacks => "feedbacks",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
