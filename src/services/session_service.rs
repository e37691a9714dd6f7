use tracing::debug;

use crate::{
    dto::{
        StatusResponse,
        game::{
            GameStateResponse, InitGameRequest, LoadStateQuery, LoadStateResponse,
            SaveBoardLayoutRequest, SaveStateRequest,
        },
    },
    error::ServiceError,
    state::SharedState,
};

/// Return the session, creating it at round 1 with a zero score when unknown.
pub async fn init_game(
    state: &SharedState,
    request: InitGameRequest,
) -> Result<GameStateResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let game_state = store.init_game_state(request.session_id).await?;
    debug!(
        session_id = %game_state.session_id,
        current_round = game_state.current_round,
        "session initialised"
    );
    Ok(game_state.into())
}

/// Replace the stored snapshot of a session.
pub async fn save_state(
    state: &SharedState,
    request: SaveStateRequest,
) -> Result<StatusResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let update = request.into_update();
    debug!(
        session_id = %update.session_id,
        current_round = update.current_round,
        score = update.score,
        "saving session state"
    );
    store.save_game_state(update).await?;
    Ok(StatusResponse::success())
}

/// Load the stored snapshot together with the roster.
pub async fn load_state(
    state: &SharedState,
    query: LoadStateQuery,
) -> Result<LoadStateResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let game_state = store
        .find_game_state(query.session_id.clone())
        .await?
        .ok_or_else(|| ServiceError::NotFound("No saved state found".into()))?;
    let players = store.list_players(query.session_id).await?;

    Ok(LoadStateResponse::new(
        game_state,
        players.into_iter().map(Into::into).collect(),
    ))
}

/// Store the client generated layout without touching the rest of the session.
pub async fn save_board_layout(
    state: &SharedState,
    request: SaveBoardLayoutRequest,
) -> Result<StatusResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let layout = request.board_layout.map(|raw| raw.get().to_owned());
    store.save_board_layout(request.session_id, layout).await?;
    Ok(StatusResponse::success())
}

#[cfg(test)]
mod tests {
    use serde_json::value::RawValue;

    use super::*;
    use crate::{
        config::AppConfig,
        dto::players::ResetPlayersRequest,
        services::{player_service, test_support::ready_state},
        state::AppState,
    };

    fn init(session_id: &str) -> InitGameRequest {
        InitGameRequest {
            session_id: session_id.into(),
        }
    }

    fn load(session_id: &str) -> LoadStateQuery {
        LoadStateQuery {
            session_id: session_id.into(),
        }
    }

    #[tokio::test]
    async fn fresh_session_loads_defaults() {
        let state = ready_state().await;
        let created = init_game(&state, init("fresh")).await.unwrap();
        assert_eq!(created.current_round, 1);
        assert_eq!(created.score, 0);
        assert!(created.board_state.is_none());

        let loaded = load_state(&state, load("fresh")).await.unwrap();
        assert_eq!(loaded.current_round, 1);
        assert_eq!(loaded.score, 0);
        assert_eq!(loaded.revealed_cells, None);
        assert!(loaded.created_at.is_some());
        assert!(loaded.players.is_empty());
    }

    #[tokio::test]
    async fn init_does_not_reset_saved_progress() {
        let state = ready_state().await;
        init_game(&state, init("s1")).await.unwrap();
        let request: SaveStateRequest = serde_json::from_str(
            r#"{"session_id":"s1","current_round":3,"score":12,"revealed_cells":"[[1,1]]"}"#,
        )
        .unwrap();
        save_state(&state, request).await.unwrap();

        let again = init_game(&state, init("s1")).await.unwrap();
        assert_eq!(again.current_round, 3);
        assert_eq!(again.score, 12);
        assert_eq!(again.revealed_cells.as_deref(), Some("[[1,1]]"));
    }

    #[tokio::test]
    async fn board_layout_round_trips_byte_for_byte() {
        let state = ready_state().await;
        let layout = r#"[[1, 2, "🎵"],[ 4,5,6 ]]"#;
        save_board_layout(
            &state,
            SaveBoardLayoutRequest {
                session_id: "layout".into(),
                board_layout: Some(RawValue::from_string(layout.into()).unwrap()),
            },
        )
        .await
        .unwrap();

        let loaded = load_state(&state, load("layout")).await.unwrap();
        assert_eq!(loaded.current_round, 1);
        let body = serde_json::to_value(&loaded).unwrap();
        assert_eq!(body["board_state"], serde_json::json!([[1, 2, "🎵"], [4, 5, 6]]));
        let text = serde_json::to_string(&loaded.board_state).unwrap();
        assert_eq!(text, layout);
    }

    #[tokio::test]
    async fn load_includes_the_roster_in_seat_order() {
        let state = ready_state().await;
        init_game(&state, init("s1")).await.unwrap();
        player_service::reset_players(
            &state,
            ResetPlayersRequest {
                session_id: "s1".into(),
            },
        )
        .await
        .unwrap();

        let loaded = load_state(&state, load("s1")).await.unwrap();
        let seats: Vec<_> = loaded.players.iter().map(|p| p.position).collect();
        assert_eq!(seats, vec![1, 2]);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let state = ready_state().await;
        let result = load_state(&state, load("missing")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn degraded_mode_is_reported() {
        let state = AppState::new(AppConfig::default());
        let result = init_game(&state, init("s1")).await;
        assert!(matches!(result, Err(ServiceError::Degraded)));
    }
}
