pub mod sqlite;

use crate::dao::models::{
    GameStateEntity, GameStateUpdate, MarkOutcome, NewOpenedCell, NewPlayer, NewQuestion,
    OpenedCellEntity, PlayerEntity, PlayerUpdate, QuestionEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for questions, sessions, opened cells and rosters.
pub trait GameStore: Send + Sync {
    /// Return the session row, creating a fresh one (round 1, score 0) when absent.
    fn init_game_state(&self, session_id: String)
    -> BoxFuture<'static, StorageResult<GameStateEntity>>;
    /// Insert or replace every mutable field of a session row.
    fn save_game_state(&self, state: GameStateUpdate) -> BoxFuture<'static, StorageResult<()>>;
    /// Store only the board layout, creating the session row when absent.
    fn save_board_layout(
        &self,
        session_id: String,
        board_state: Option<String>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn find_game_state(
        &self,
        session_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<GameStateEntity>>>;

    /// Insert catalog entries that are not present yet, returning how many were added.
    fn seed_questions(&self, questions: Vec<NewQuestion>) -> BoxFuture<'static, StorageResult<u64>>;
    fn random_question(
        &self,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>>;
    fn find_question(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>>;
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;

    /// Record a cell reveal unless the same (session, round, row, col) was already recorded.
    fn mark_cell_opened(&self, cell: NewOpenedCell) -> BoxFuture<'static, StorageResult<MarkOutcome>>;
    fn list_opened_cells(
        &self,
        session_id: String,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<OpenedCellEntity>>>;
    /// Delete every reveal of a (session, round) scope, returning the number of removed records.
    fn clear_opened_cells(
        &self,
        session_id: String,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<u64>>;

    fn list_players(&self, session_id: String)
    -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    fn add_player(&self, player: NewPlayer) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    fn update_player(
        &self,
        session_id: String,
        update: PlayerUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    /// Remove a player and re-number the remaining seats, returning whether a row was deleted.
    fn remove_player(
        &self,
        session_id: String,
        player_id: i64,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// Replace the whole roster by players with the given names, seated in order.
    fn reset_players(
        &self,
        session_id: String,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Release every pooled connection; the store is unusable afterwards.
    fn close(&self) -> BoxFuture<'static, ()>;
}
