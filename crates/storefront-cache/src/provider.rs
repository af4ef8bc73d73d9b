//! Store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use storefront_core::config::session::{SessionConfig, StorageBackend};
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::KeyValueStore;

/// Store manager that wraps the configured key-value backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store.
    inner: Arc<dyn KeyValueStore>,
}

impl StoreManager {
    /// Create a new store manager from session configuration.
    pub fn new(config: &SessionConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.storage {
            #[cfg(feature = "file")]
            StorageBackend::File => {
                info!(path = %config.storage_path.display(), "Initializing file session store");
                Arc::new(crate::file::FileStore::new(config.storage_path.clone()))
            }
            #[cfg(feature = "memory")]
            StorageBackend::Memory => {
                info!("Initializing in-memory session store");
                Arc::new(crate::memory::MemoryStore::new())
            }
            #[allow(unreachable_patterns)]
            other => {
                return Err(AppError::configuration(format!(
                    "Session storage backend '{other}' is not compiled in"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner: store }
    }

    /// Get a shared handle to the inner store.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl KeyValueStore for StoreManager {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.inner.remove_many(keys).await
    }
}
