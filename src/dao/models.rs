use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// Trivia entry of the question catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Primary key assigned by the database.
    pub id: i64,
    /// Round the question belongs to.
    pub round_num: i64,
    /// Text shown to the players.
    pub question_text: String,
    /// Expected answer.
    pub answer: String,
    /// Theme of the round (e.g. "Музыкальные жанры").
    pub theme: String,
}

/// Catalog entry that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub round_num: i64,
    pub question_text: String,
    pub answer: String,
    pub theme: String,
}

/// Persisted progress of a single game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateEntity {
    /// Client supplied session identifier (unique).
    pub session_id: String,
    /// Round the client reported last.
    pub current_round: i64,
    /// Cell the client was working on, stored as text.
    pub current_cell: Option<String>,
    /// Aggregated score reported by the client.
    pub score: i64,
    /// Serialized set of revealed cells, stored verbatim.
    pub revealed_cells: Option<String>,
    /// JSON text of the client generated board layout.
    pub board_state: Option<String>,
    /// Creation timestamp of the row.
    pub created_at: Option<PrimitiveDateTime>,
}

/// Full replacement payload for a session row (everything but `created_at`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateUpdate {
    pub session_id: String,
    pub current_round: i64,
    pub current_cell: Option<String>,
    pub score: i64,
    pub revealed_cells: Option<String>,
    pub board_state: Option<String>,
}

/// Record of a board cell revealed during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedCellEntity {
    pub session_id: String,
    pub round_num: i64,
    pub row: i64,
    pub col: i64,
    /// Label that was under the cell (question number or symbol).
    pub cell_value: String,
    pub created_at: Option<PrimitiveDateTime>,
}

/// Cell reveal requested by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpenedCell {
    pub session_id: String,
    pub round_num: i64,
    pub row: i64,
    pub col: i64,
    pub cell_value: String,
}

/// Outcome of a compare-and-insert on the opened cells ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The cell was not opened before and has been recorded.
    Opened,
    /// A record with the same (session, round, row, col) already exists.
    AlreadyOpened,
}

/// Player of a session roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Stable identifier assigned when the player was added.
    pub id: i64,
    pub session_id: String,
    /// Display name, not unique.
    pub player_name: String,
    pub score: i64,
    /// 1-based seat, dense within a session.
    pub position: i64,
}

/// Player appended to the end of a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub session_id: String,
    /// Explicit name; `None` asks the store for a positional placeholder.
    pub player_name: Option<String>,
    /// Prefix of the placeholder name, completed with the new position.
    pub placeholder_prefix: String,
}

/// Mutation applied to a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub player_id: i64,
    pub score: i64,
    /// New display name, `None` keeps the current one.
    pub player_name: Option<String>,
}
