//! Application state shared across services and presenters.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::events::EventBus;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

/// Application state owned by the shell.
///
/// This struct is cheaply cloneable via `Arc`. It is the single container
/// for storefront state: the persistent store, the transient per-session
/// store, the event bus, and the configuration. All mutation goes through
/// the services; nothing lives in module-level globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    events: EventBus,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Uses a file-backed persistent store when `config.store_path` is set,
    /// otherwise an in-memory one. The session store is always in-memory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store: Box<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Box::new(FileStore::open(path)),
            None => Box::new(MemoryStore::new()),
        };
        Self::with_stores(config, store, Box::new(MemoryStore::new()))
    }

    /// Create application state with explicit store backends.
    ///
    /// The shell chooses what "persistent" and "session-scoped" mean for its
    /// environment (e.g. the CLI backs both with files so state survives
    /// between invocations).
    #[must_use]
    pub fn with_stores(
        config: StorefrontConfig,
        store: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                session,
                events: EventBus::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the persistent store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the transient per-session store.
    #[must_use]
    pub fn session(&self) -> &dyn KeyValueStore {
        self.inner.session.as_ref()
    }

    /// Get a reference to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("events", &self.inner.events)
            .finish_non_exhaustive()
    }
}
