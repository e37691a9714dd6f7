use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{game_store::GameStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Connect to the storage backend, keep polling its health and fall back to degraded mode
/// while it is unreachable. Never returns.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn GameStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.set_game_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                delay = INITIAL_DELAY;

                watch_health(&state, store.as_ref()).await;

                warn!("exhausted storage reconnect attempts; opening a new pool");
                if let Some(previous) = state.clear_game_store().await {
                    previous.close().await;
                }
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Poll the installed store until it stays unreachable after [`MAX_RECONNECT_ATTEMPTS`].
async fn watch_health(state: &SharedState, store: &dyn GameStore) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded() {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false);
                }
                sleep(HEALTH_POLL_INTERVAL).await;
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                if !reconnect(state, store).await {
                    return;
                }
                state.update_degraded(false);
                sleep(HEALTH_POLL_INTERVAL).await;
            }
        }
    }
}

async fn reconnect(state: &SharedState, store: &dyn GameStore) -> bool {
    let mut reconnect_delay = INITIAL_DELAY;

    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) => {
                if attempt == 0 {
                    warn!(
                        attempt, error = %err,
                        "storage reconnect first attempt failed; entering degraded mode"
                    );
                    state.update_degraded(true);
                } else {
                    warn!(attempt, error = %err, "storage reconnect attempt failed");
                }
                sleep(reconnect_delay).await;
                reconnect_delay = (reconnect_delay * 2).min(MAX_DELAY);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::game_store::sqlite::{SqliteConfig, SqliteGameStore},
        state::AppState,
    };

    #[tokio::test]
    async fn installs_the_store_once_connected() {
        let state = AppState::new(AppConfig::default());
        let attempts = Arc::new(AtomicU32::new(0));
        let mut watcher = state.degraded_watcher();

        let counter = attempts.clone();
        let task = tokio::spawn(run(state.clone(), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let store = SqliteGameStore::connect(SqliteConfig::in_memory()).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn GameStore>)
            }
        }));

        watcher.changed().await.unwrap();
        assert!(!*watcher.borrow());
        assert!(state.require_game_store().await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        task.abort();
    }
}
