//! Directory-backed implementation of the key-value store.
//!
//! Every key maps to `<dir>/<key>.json`. Writes go to a temporary file in
//! the same directory, are fsynced, and then renamed over the target, so a
//! crash mid-write leaves the previous blob intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::KeyValueStore;
use crate::error::LedgerError;

/// Key-value store persisting one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "file store opened");
        Ok(Self { dir })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LedgerError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(LedgerError::Storage(format!("invalid storage key `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), LedgerError> {
        let final_path = self.path_for(key)?;
        let tmp_path = self
            .dir
            .join(format!("{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(err) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        Ok(())
    }
}
