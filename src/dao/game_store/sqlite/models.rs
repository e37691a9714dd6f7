use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::dao::models::{GameStateEntity, OpenedCellEntity, PlayerEntity, QuestionEntity};

/// Raw `questions` row.
#[derive(Debug, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub round_num: Option<i64>,
    pub question_text: String,
    pub answer: String,
    pub theme: String,
}

impl From<QuestionRow> for QuestionEntity {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: row.id,
            round_num: row.round_num.unwrap_or_default(),
            question_text: row.question_text,
            answer: row.answer,
            theme: row.theme,
        }
    }
}

/// Raw `game_states` row. Nullable columns fall back to the table defaults.
#[derive(Debug, FromRow)]
pub struct GameStateRow {
    pub session_id: String,
    pub current_round: Option<i64>,
    pub current_cell: Option<String>,
    pub score: Option<i64>,
    pub revealed_cells: Option<String>,
    pub board_state: Option<String>,
    pub created_at: Option<PrimitiveDateTime>,
}

impl From<GameStateRow> for GameStateEntity {
    fn from(row: GameStateRow) -> Self {
        Self {
            session_id: row.session_id,
            current_round: row.current_round.unwrap_or(1),
            current_cell: row.current_cell,
            score: row.score.unwrap_or(0),
            revealed_cells: row.revealed_cells,
            board_state: row.board_state,
            created_at: row.created_at,
        }
    }
}

/// Raw `opened_cells` row.
#[derive(Debug, FromRow)]
pub struct OpenedCellRow {
    pub session_id: String,
    pub round_num: i64,
    pub row_num: i64,
    pub col_num: i64,
    pub cell_value: String,
    pub created_at: Option<PrimitiveDateTime>,
}

impl From<OpenedCellRow> for OpenedCellEntity {
    fn from(row: OpenedCellRow) -> Self {
        Self {
            session_id: row.session_id,
            round_num: row.round_num,
            row: row.row_num,
            col: row.col_num,
            cell_value: row.cell_value,
            created_at: row.created_at,
        }
    }
}

/// Raw `players` row.
#[derive(Debug, FromRow)]
pub struct PlayerRow {
    pub id: i64,
    pub session_id: Option<String>,
    pub player_name: Option<String>,
    pub score: Option<i64>,
    pub position: Option<i64>,
}

impl From<PlayerRow> for PlayerEntity {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id.unwrap_or_default(),
            player_name: row.player_name.unwrap_or_default(),
            score: row.score.unwrap_or(0),
            position: row.position.unwrap_or(0),
        }
    }
}
