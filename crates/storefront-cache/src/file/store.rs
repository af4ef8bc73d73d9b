//! JSON file key-value store with per-entry expiry.
//!
//! The file holds a single object mapping each key to its value and
//! absolute expiry time, the same shape a browser cookie jar keeps:
//!
//! ```json
//! { "accessToken": { "value": "...", "expires_at": "2026-01-01T00:00:00Z" } }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::KeyValueStore;

/// One persisted entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl FileEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// File-backed key-value store.
///
/// Read-modify-write cycles are serialized by an internal lock, and each
/// write replaces the file atomically via a temporary sibling.
#[derive(Debug)]
pub struct FileStore {
    /// Path of the JSON file.
    path: PathBuf,
    /// Serializes access to the file within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load live entries. A missing file is an empty jar; an unreadable
    /// one is discarded.
    async fn load(&self) -> AppResult<HashMap<String, FileEntry>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read '{}': {e}",
                    self.path.display()
                )));
            }
        };

        let entries: HashMap<String, FileEntry> = match serde_json::from_slice(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt store file");
                return Ok(HashMap::new());
            }
        };

        let now = Utc::now();
        Ok(entries
            .into_iter()
            .filter(|(_, entry)| entry.is_live(now))
            .collect())
    }

    async fn save(&self, entries: &HashMap<String, FileEntry>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Failed to create '{}': {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write '{}': {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace '{}': {e}", self.path.display()))
        })?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::validation(format!("TTL out of range: {e}")))?;

        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(
            key.to_string(),
            FileEntry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        self.save(&entries).await?;
        debug!(key, path = %self.path.display(), "Stored entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.remove_many(&[key]).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before || self.path.exists() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}
