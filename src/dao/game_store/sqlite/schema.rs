//! Idempotent creation of the tables and indexes used by the game.

use sqlx::SqlitePool;
use tracing::info;

use super::error::{SqliteDaoError, SqliteResult};

const CREATE_QUESTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        round_num INTEGER NOT NULL,
        question_text TEXT NOT NULL,
        answer TEXT NOT NULL,
        theme TEXT NOT NULL
    )
"#;

const CREATE_GAME_STATES: &str = r#"
    CREATE TABLE IF NOT EXISTS game_states (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT UNIQUE NOT NULL,
        current_round INTEGER DEFAULT 1,
        current_cell TEXT,
        score INTEGER DEFAULT 0,
        revealed_cells TEXT,
        board_state TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_OPENED_CELLS: &str = r#"
    CREATE TABLE IF NOT EXISTS opened_cells (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT NOT NULL,
        round_num INTEGER NOT NULL,
        row_num INTEGER NOT NULL,
        col_num INTEGER NOT NULL,
        cell_value TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_SCORES: &str = r#"
    CREATE TABLE IF NOT EXISTS scores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT,
        round_num INTEGER,
        player_name TEXT,
        score INTEGER,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_PLAYERS: &str = r#"
    CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id TEXT,
        player_name TEXT,
        score INTEGER DEFAULT 0,
        position INTEGER,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

// Databases written by older servers may hold duplicate reveals; keep the first one.
const DEDUPLICATE_OPENED_CELLS: &str = r#"
    DELETE FROM opened_cells
    WHERE id NOT IN (
        SELECT MIN(id) FROM opened_cells
        GROUP BY session_id, round_num, row_num, col_num
    )
"#;

const CREATE_OPENED_CELLS_KEY: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS opened_cells_key_idx
    ON opened_cells (session_id, round_num, row_num, col_num)
"#;

const CREATE_PLAYERS_SEAT: &str = r#"
    CREATE INDEX IF NOT EXISTS players_session_position_idx
    ON players (session_id, position)
"#;

const CREATE_QUESTIONS_ROUND: &str = r#"
    CREATE INDEX IF NOT EXISTS questions_round_idx
    ON questions (round_num)
"#;

/// Create every table and index when missing. Safe to run on each start.
pub async fn ensure_schema(pool: &SqlitePool) -> SqliteResult<()> {
    let statements: [(&'static str, &str); 9] = [
        ("questions", CREATE_QUESTIONS),
        ("game_states", CREATE_GAME_STATES),
        ("opened_cells", CREATE_OPENED_CELLS),
        ("scores", CREATE_SCORES),
        ("players", CREATE_PLAYERS),
        ("opened_cells duplicates", DEDUPLICATE_OPENED_CELLS),
        ("opened_cells_key_idx", CREATE_OPENED_CELLS_KEY),
        ("players_session_position_idx", CREATE_PLAYERS_SEAT),
        ("questions_round_idx", CREATE_QUESTIONS_ROUND),
    ];

    for (object, sql) in statements {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|source| SqliteDaoError::EnsureSchema { object, source })?;
    }

    info!("SQLite schema ready");
    Ok(())
}
