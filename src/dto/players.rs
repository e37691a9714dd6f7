use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dao::models::PlayerEntity,
    dto::validation::{validate_player_name, validate_session_id},
};

/// Roster entry exposed to clients.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct PlayerDto {
    pub player_id: i64,
    pub player_name: String,
    pub score: i64,
    /// 1-based seat, gapless within the session.
    pub position: i64,
}

impl From<PlayerEntity> for PlayerDto {
    fn from(player: PlayerEntity) -> Self {
        Self {
            player_id: player.id,
            player_name: player.player_name,
            score: player.score,
            position: player.position,
        }
    }
}

/// Query string of `/api/get_players`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct PlayersQuery {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlayersResponse {
    pub players: Vec<PlayerDto>,
}

/// Append a player; a missing or blank name gets a positional placeholder.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPlayerRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_player_name"))]
    pub player_name: Option<String>,
}

/// Set the score of a player and optionally rename them.
///
/// The player is selected by `player_id`, or by a `player_name` matching exactly one player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePlayerRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    #[validate(custom(function = "validate_player_name"))]
    pub new_player_name: Option<String>,
}

/// Remove a player selected by `player_id` or by a unique `player_name`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RemovePlayerRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ResetPlayersRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
}

/// Outcome of an add or update.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    pub status: String,
    pub player: PlayerDto,
}

impl PlayerResponse {
    pub fn success(player: PlayerDto) -> Self {
        Self {
            status: "success".into(),
            player,
        }
    }
}

/// Roster recreated by `/api/reset_players`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetPlayersResponse {
    pub status: String,
    pub players: Vec<PlayerDto>,
}

impl ResetPlayersResponse {
    pub fn success(players: Vec<PlayerDto>) -> Self {
        Self {
            status: "success".into(),
            players,
        }
    }
}
