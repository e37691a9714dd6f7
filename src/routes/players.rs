use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        StatusResponse,
        players::{
            AddPlayerRequest, PlayerResponse, PlayersQuery, PlayersResponse, RemovePlayerRequest,
            ResetPlayersRequest, ResetPlayersResponse, UpdatePlayerRequest,
        },
    },
    error::{AppError, ErrorBody},
    routes::extract::{ValidJson, ValidQuery},
    services::player_service,
    state::SharedState,
};

/// Routes managing the session roster.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/get_players", get(get_players))
        .route("/api/add_player", post(add_player))
        .route("/api/update_player", post(update_player))
        .route("/api/remove_player", post(remove_player))
        .route("/api/reset_players", post(reset_players))
}

#[utoipa::path(
    get,
    path = "/api/get_players",
    tag = "players",
    params(PlayersQuery),
    responses((status = 200, description = "Roster ordered by position", body = PlayersResponse))
)]
pub async fn get_players(
    State(state): State<SharedState>,
    ValidQuery(query): ValidQuery<PlayersQuery>,
) -> Result<Json<PlayersResponse>, AppError> {
    Ok(Json(player_service::list_players(&state, query).await?))
}

/// Seat a player after the last one.
#[utoipa::path(
    post,
    path = "/api/add_player",
    tag = "players",
    request_body = AddPlayerRequest,
    responses((status = 200, description = "Player added", body = PlayerResponse))
)]
pub async fn add_player(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<AddPlayerRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    Ok(Json(player_service::add_player(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/update_player",
    tag = "players",
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = PlayerResponse),
        (status = 404, description = "Player not found", body = ErrorBody),
        (status = 409, description = "Ambiguous player name", body = ErrorBody)
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<UpdatePlayerRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    Ok(Json(player_service::update_player(&state, payload).await?))
}

/// Remove a player and renumber the remaining seats.
#[utoipa::path(
    post,
    path = "/api/remove_player",
    tag = "players",
    request_body = RemovePlayerRequest,
    responses(
        (status = 200, description = "Player removed", body = StatusResponse),
        (status = 404, description = "Player not found", body = ErrorBody),
        (status = 409, description = "Ambiguous player name", body = ErrorBody)
    )
)]
pub async fn remove_player(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<RemovePlayerRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(player_service::remove_player(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/reset_players",
    tag = "players",
    request_body = ResetPlayersRequest,
    responses((status = 200, description = "Two placeholder players", body = ResetPlayersResponse))
)]
pub async fn reset_players(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<ResetPlayersRequest>,
) -> Result<Json<ResetPlayersResponse>, AppError> {
    Ok(Json(player_service::reset_players(&state, payload).await?))
}
