use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::game_store::GameStore, error::ServiceError};

pub type SharedState = Arc<AppState>;

/// Central application state: the installed storage handle, the immutable configuration and
/// the degraded-mode flag.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    config: AppConfig,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            config,
            degraded: degraded_tx,
        })
    }

    /// Game configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Return the installed store, or [`ServiceError::Degraded`] while storage is unusable.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        if self.is_degraded() {
            return Err(ServiceError::Degraded);
        }
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current game store and enter degraded mode, returning the removed handle.
    pub async fn clear_game_store(&self) -> Option<Arc<dyn GameStore>> {
        let previous = {
            let mut guard = self.game_store.write().await;
            guard.take()
        };
        self.update_degraded(true);
        previous
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}
