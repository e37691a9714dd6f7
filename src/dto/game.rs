//! Session state payloads: init, save, load and board layout.

use serde::{Deserialize, Serialize};
use serde_json::{Value, value::RawValue};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dao::models::{GameStateEntity, GameStateUpdate},
    dto::{format_timestamp, json_text, players::PlayerDto, validation::validate_session_id},
};

/// Request opening (or resuming) a session.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct InitGameRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
}

/// Full client snapshot persisted by `/api/save_state`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveStateRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    pub current_round: i64,
    /// String stored verbatim, any other JSON stored as its text.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub current_cell: Option<Value>,
    pub score: i64,
    /// String stored verbatim, any other JSON stored as its text.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub revealed_cells: Option<Value>,
    /// Opaque board layout, stored byte for byte.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub board_state: Option<Box<RawValue>>,
}

impl SaveStateRequest {
    pub fn into_update(self) -> GameStateUpdate {
        GameStateUpdate {
            session_id: self.session_id,
            current_round: self.current_round,
            current_cell: self.current_cell.and_then(json_text),
            score: self.score,
            revealed_cells: self.revealed_cells.and_then(json_text),
            board_state: self.board_state.map(|raw| raw.get().to_owned()),
        }
    }
}

/// Board layout generated by the client.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveBoardLayoutRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub board_layout: Option<Box<RawValue>>,
}

/// Query string of `/api/load_state`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct LoadStateQuery {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
}

/// Stored board layout: the original JSON when it parses, the raw text otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BoardState {
    Json(Box<RawValue>),
    Raw(String),
}

impl BoardState {
    pub fn from_stored(text: String) -> Self {
        match RawValue::from_string(text.clone()) {
            Ok(raw) => BoardState::Json(raw),
            Err(_) => BoardState::Raw(text),
        }
    }
}

/// Session snapshot returned by `/api/init_game`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameStateResponse {
    pub session_id: String,
    pub current_round: i64,
    pub current_cell: Option<String>,
    pub score: i64,
    pub revealed_cells: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub board_state: Option<BoardState>,
}

impl From<GameStateEntity> for GameStateResponse {
    fn from(state: GameStateEntity) -> Self {
        Self {
            session_id: state.session_id,
            current_round: state.current_round,
            current_cell: state.current_cell,
            score: state.score,
            revealed_cells: state.revealed_cells,
            board_state: state.board_state.map(BoardState::from_stored),
        }
    }
}

/// Saved session plus its roster, returned by `/api/load_state`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoadStateResponse {
    pub current_round: i64,
    pub current_cell: Option<String>,
    pub score: i64,
    pub revealed_cells: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub board_state: Option<BoardState>,
    /// RFC 3339 creation time of the session.
    pub created_at: Option<String>,
    /// Roster ordered by position.
    pub players: Vec<PlayerDto>,
}

impl LoadStateResponse {
    pub fn new(state: GameStateEntity, players: Vec<PlayerDto>) -> Self {
        Self {
            current_round: state.current_round,
            current_cell: state.current_cell,
            score: state.score,
            revealed_cells: state.revealed_cells,
            board_state: state.board_state.map(BoardState::from_stored),
            created_at: state.created_at.map(format_timestamp),
            players,
        }
    }
}
