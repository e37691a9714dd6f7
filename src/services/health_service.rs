use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the installed store and report whether the database answers.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = match state.require_game_store().await {
        Ok(store) => store,
        Err(_) => {
            warn!("storage unavailable (degraded mode)");
            return HealthResponse::unhealthy();
        }
    };

    match store.health_check().await {
        Ok(()) => HealthResponse::healthy(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::unhealthy()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, services::test_support::ready_state, state::AppState};

    #[tokio::test]
    async fn healthy_when_the_store_answers() {
        let state = ready_state().await;
        assert_eq!(health_status(&state).await, HealthResponse::healthy());
    }

    #[tokio::test]
    async fn unhealthy_without_a_store() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(health_status(&state).await, HealthResponse::unhealthy());
    }

    #[tokio::test]
    async fn unhealthy_after_the_pool_is_closed() {
        let state = ready_state().await;
        state.game_store().await.unwrap().close().await;
        assert_eq!(health_status(&state).await, HealthResponse::unhealthy());
    }
}
