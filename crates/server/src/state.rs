//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::FileStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`FileStore`] inside owns
/// the per-file lock table, so every clone serializes writes through the
/// same locks.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: FileStore,
}

impl AppState {
    /// Create a new application state over `config.data_dir`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store = FileStore::new(config.data_dir.clone());

        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the flat-file store.
    #[must_use]
    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }
}
