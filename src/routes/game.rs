use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        StatusResponse,
        game::{
            GameStateResponse, InitGameRequest, LoadStateQuery, LoadStateResponse,
            SaveBoardLayoutRequest, SaveStateRequest,
        },
    },
    error::{AppError, ErrorBody},
    routes::extract::{ValidJson, ValidQuery},
    services::session_service,
    state::SharedState,
};

/// Routes persisting the per-session game state.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/init_game", post(init_game))
        .route("/api/save_state", post(save_state))
        .route("/api/load_state", get(load_state))
        .route("/api/save_board_layout", post(save_board_layout))
}

/// Open a session, or return it untouched when it already exists.
#[utoipa::path(
    post,
    path = "/api/init_game",
    tag = "game",
    request_body = InitGameRequest,
    responses(
        (status = 200, description = "Session state", body = GameStateResponse),
        (status = 400, description = "Invalid session id", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn init_game(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<InitGameRequest>,
) -> Result<Json<GameStateResponse>, AppError> {
    Ok(Json(session_service::init_game(&state, payload).await?))
}

/// Replace the stored snapshot of a session.
#[utoipa::path(
    post,
    path = "/api/save_state",
    tag = "game",
    request_body = SaveStateRequest,
    responses(
        (status = 200, description = "State saved", body = StatusResponse),
        (status = 400, description = "Malformed state", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn save_state(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<SaveStateRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(session_service::save_state(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/load_state",
    tag = "game",
    params(LoadStateQuery),
    responses(
        (status = 200, description = "Saved state with roster", body = LoadStateResponse),
        (status = 404, description = "No saved state found", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn load_state(
    State(state): State<SharedState>,
    ValidQuery(query): ValidQuery<LoadStateQuery>,
) -> Result<Json<LoadStateResponse>, AppError> {
    Ok(Json(session_service::load_state(&state, query).await?))
}

/// Store the board layout generated by the client.
#[utoipa::path(
    post,
    path = "/api/save_board_layout",
    tag = "game",
    request_body = SaveBoardLayoutRequest,
    responses(
        (status = 200, description = "Layout saved", body = StatusResponse),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn save_board_layout(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<SaveBoardLayoutRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(session_service::save_board_layout(&state, payload).await?))
}
