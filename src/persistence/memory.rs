//! In-process implementation of the key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::LedgerError;

/// Key-value store held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with raw blobs, e.g. to load
    /// hand-written or corrupt fixtures.
    #[must_use]
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            blobs: RwLock::new(
                blobs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), LedgerError> {
        self.blobs.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
