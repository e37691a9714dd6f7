use futures::future::BoxFuture;
use rand::{Rng, rng};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::dao::{
    game_store::GameStore,
    models::{
        GameStateEntity, GameStateUpdate, MarkOutcome, NewOpenedCell, NewPlayer, NewQuestion,
        OpenedCellEntity, PlayerEntity, PlayerUpdate, QuestionEntity,
    },
    storage::StorageResult,
};

use super::{
    config::SqliteConfig,
    connection::establish_pool,
    error::{SqliteDaoError, SqliteResult},
    models::{GameStateRow, OpenedCellRow, PlayerRow, QuestionRow},
    schema::ensure_schema,
};

/// [`GameStore`] backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteGameStore {
    pool: SqlitePool,
}

impl SqliteGameStore {
    /// Open the pool and make sure every table exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let pool = establish_pool(&config).await?;
        ensure_schema(&pool).await?;
        info!(
            url = %config.url,
            max_connections = config.effective_max_connections(),
            "connected to SQLite"
        );
        Ok(Self { pool })
    }

    async fn find_state(&self, session_id: &str) -> SqliteResult<Option<GameStateEntity>> {
        let row = sqlx::query_as::<_, GameStateRow>(
            r#"
            SELECT session_id, current_round, current_cell, score, revealed_cells,
                   board_state, created_at
            FROM game_states
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqliteDaoError::query("load session state"))?;

        Ok(row.map(Into::into))
    }

    async fn init_state(&self, session_id: &str) -> SqliteResult<GameStateEntity> {
        let created = sqlx::query(
            r#"
            INSERT INTO game_states (session_id, current_round, score)
            VALUES (?, 1, 0)
            ON CONFLICT(session_id) DO NOTHING
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(SqliteDaoError::query("create session state"))?
        .rows_affected()
            > 0;

        if created {
            debug!(session_id, "created session state");
        }

        self.find_state(session_id)
            .await?
            .ok_or_else(|| SqliteDaoError::Query {
                operation: "reload created session state",
                source: sqlx::Error::RowNotFound,
            })
    }

    async fn save_state(&self, state: GameStateUpdate) -> SqliteResult<()> {
        sqlx::query(
            r#"
            INSERT INTO game_states
                (session_id, current_round, current_cell, score, revealed_cells, board_state)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(session_id) DO UPDATE SET
                current_round = excluded.current_round,
                current_cell = excluded.current_cell,
                score = excluded.score,
                revealed_cells = excluded.revealed_cells,
                board_state = excluded.board_state
            "#,
        )
        .bind(&state.session_id)
        .bind(state.current_round)
        .bind(&state.current_cell)
        .bind(state.score)
        .bind(&state.revealed_cells)
        .bind(&state.board_state)
        .execute(&self.pool)
        .await
        .map_err(SqliteDaoError::query("save session state"))?;
        Ok(())
    }

    async fn save_layout(&self, session_id: &str, board_state: Option<String>) -> SqliteResult<()> {
        sqlx::query(
            r#"
            INSERT INTO game_states (session_id, current_round, score, board_state)
            VALUES (?, 1, 0, ?)
            ON CONFLICT(session_id) DO UPDATE SET board_state = excluded.board_state
            "#,
        )
        .bind(session_id)
        .bind(board_state)
        .execute(&self.pool)
        .await
        .map_err(SqliteDaoError::query("save board layout"))?;
        Ok(())
    }

    async fn seed(&self, questions: Vec<NewQuestion>) -> SqliteResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(SqliteDaoError::transaction("seed questions"))?;

        let mut inserted = 0;
        for question in &questions {
            inserted += sqlx::query(
                r#"
                INSERT INTO questions (round_num, question_text, answer, theme)
                SELECT ?, ?, ?, ?
                WHERE NOT EXISTS (
                    SELECT 1 FROM questions
                    WHERE round_num = ? AND question_text = ? AND answer = ? AND theme = ?
                )
                "#,
            )
            .bind(question.round_num)
            .bind(&question.question_text)
            .bind(&question.answer)
            .bind(&question.theme)
            .bind(question.round_num)
            .bind(&question.question_text)
            .bind(&question.answer)
            .bind(&question.theme)
            .execute(&mut *tx)
            .await
            .map_err(SqliteDaoError::query("insert catalog question"))?
            .rows_affected();
        }

        tx.commit()
            .await
            .map_err(SqliteDaoError::transaction("seed questions"))?;
        Ok(inserted)
    }

    async fn pick_question(&self, round_num: i64) -> SqliteResult<Option<QuestionEntity>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions WHERE round_num = ?")
            .bind(round_num)
            .fetch_one(&self.pool)
            .await
            .map_err(SqliteDaoError::query("count round questions"))?;
        if count == 0 {
            return Ok(None);
        }

        let offset = rng().random_range(0..count);
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, round_num, question_text, answer, theme
            FROM questions
            WHERE round_num = ?
            ORDER BY id
            LIMIT 1 OFFSET ?
            "#,
        )
        .bind(round_num)
        .bind(offset)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqliteDaoError::query("pick a random question"))?;
        Ok(row.map(Into::into))
    }

    async fn question_by_id(&self, id: i64) -> SqliteResult<Option<QuestionEntity>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, round_num, question_text, answer, theme FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqliteDaoError::query("load question"))?;
        Ok(row.map(Into::into))
    }

    async fn all_questions(&self) -> SqliteResult<Vec<QuestionEntity>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, round_num, question_text, answer, theme FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SqliteDaoError::query("list questions"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_opened(&self, cell: NewOpenedCell) -> SqliteResult<MarkOutcome> {
        // The unique key turns the existence check and the insert into one statement.
        let inserted = sqlx::query(
            r#"
            INSERT INTO opened_cells (session_id, round_num, row_num, col_num, cell_value)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(session_id, round_num, row_num, col_num) DO NOTHING
            "#,
        )
        .bind(&cell.session_id)
        .bind(cell.round_num)
        .bind(cell.row)
        .bind(cell.col)
        .bind(&cell.cell_value)
        .execute(&self.pool)
        .await
        .map_err(SqliteDaoError::query("mark cell opened"))?
        .rows_affected();

        Ok(if inserted > 0 {
            MarkOutcome::Opened
        } else {
            MarkOutcome::AlreadyOpened
        })
    }

    async fn opened_cells(
        &self,
        session_id: &str,
        round_num: i64,
    ) -> SqliteResult<Vec<OpenedCellEntity>> {
        let rows = sqlx::query_as::<_, OpenedCellRow>(
            r#"
            SELECT session_id, round_num, row_num, col_num, cell_value, created_at
            FROM opened_cells
            WHERE session_id = ? AND round_num = ?
            ORDER BY id
            "#,
        )
        .bind(session_id)
        .bind(round_num)
        .fetch_all(&self.pool)
        .await
        .map_err(SqliteDaoError::query("list opened cells"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn clear_opened(&self, session_id: &str, round_num: i64) -> SqliteResult<u64> {
        let removed = sqlx::query("DELETE FROM opened_cells WHERE session_id = ? AND round_num = ?")
            .bind(session_id)
            .bind(round_num)
            .execute(&self.pool)
            .await
            .map_err(SqliteDaoError::query("clear opened cells"))?
            .rows_affected();
        Ok(removed)
    }

    async fn roster(&self, session_id: &str) -> SqliteResult<Vec<PlayerEntity>> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT id, session_id, player_name, score, position
            FROM players
            WHERE session_id = ?
            ORDER BY position, id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(SqliteDaoError::query("list players"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn append_player(&self, player: NewPlayer) -> SqliteResult<PlayerEntity> {
        // Seat and placeholder name are computed by the insert itself.
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            INSERT INTO players (session_id, player_name, score, position)
            SELECT ?,
                   COALESCE(?, ? || ' ' || (COALESCE(MAX(position), 0) + 1)),
                   0,
                   COALESCE(MAX(position), 0) + 1
            FROM players
            WHERE session_id = ?
            RETURNING id, session_id, player_name, score, position
            "#,
        )
        .bind(&player.session_id)
        .bind(&player.player_name)
        .bind(&player.placeholder_prefix)
        .bind(&player.session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(SqliteDaoError::query("add player"))?;
        Ok(row.into())
    }

    async fn change_player(
        &self,
        session_id: &str,
        update: PlayerUpdate,
    ) -> SqliteResult<Option<PlayerEntity>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            UPDATE players
            SET score = ?, player_name = COALESCE(?, player_name)
            WHERE session_id = ? AND id = ?
            RETURNING id, session_id, player_name, score, position
            "#,
        )
        .bind(update.score)
        .bind(&update.player_name)
        .bind(session_id)
        .bind(update.player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqliteDaoError::query("update player"))?;
        Ok(row.map(Into::into))
    }

    async fn delete_player(&self, session_id: &str, player_id: i64) -> SqliteResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(SqliteDaoError::transaction("remove player"))?;

        let removed = sqlx::query("DELETE FROM players WHERE session_id = ? AND id = ?")
            .bind(session_id)
            .bind(player_id)
            .execute(&mut *tx)
            .await
            .map_err(SqliteDaoError::query("remove player"))?
            .rows_affected();

        if removed > 0 {
            let remaining: Vec<(i64,)> =
                sqlx::query_as("SELECT id FROM players WHERE session_id = ? ORDER BY position, id")
                    .bind(session_id)
                    .fetch_all(&mut *tx)
                    .await
                    .map_err(SqliteDaoError::query("list remaining players"))?;

            for (seat, (id,)) in (1_i64..).zip(remaining) {
                sqlx::query("UPDATE players SET position = ? WHERE id = ?")
                    .bind(seat)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(SqliteDaoError::query("re-number player seats"))?;
            }
        }

        tx.commit()
            .await
            .map_err(SqliteDaoError::transaction("remove player"))?;
        Ok(removed > 0)
    }

    async fn replace_roster(
        &self,
        session_id: &str,
        names: Vec<String>,
    ) -> SqliteResult<Vec<PlayerEntity>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(SqliteDaoError::transaction("reset players"))?;

        sqlx::query("DELETE FROM players WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(SqliteDaoError::query("delete players"))?;

        let mut players = Vec::with_capacity(names.len());
        for (seat, name) in (1_i64..).zip(names) {
            let row = sqlx::query_as::<_, PlayerRow>(
                r#"
                INSERT INTO players (session_id, player_name, score, position)
                VALUES (?, ?, 0, ?)
                RETURNING id, session_id, player_name, score, position
                "#,
            )
            .bind(session_id)
            .bind(name)
            .bind(seat)
            .fetch_one(&mut *tx)
            .await
            .map_err(SqliteDaoError::query("insert default player"))?;
            players.push(row.into());
        }

        tx.commit()
            .await
            .map_err(SqliteDaoError::transaction("reset players"))?;
        Ok(players)
    }

    async fn ping(&self) -> SqliteResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> SqliteResult<()> {
        // The pool replaces broken connections by itself; make sure a fresh one can be opened.
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|source| SqliteDaoError::HealthPing { source })?;
        sqlx::query("SELECT 1")
            .execute(&mut *connection)
            .await
            .map_err(|source| SqliteDaoError::HealthPing { source })?;
        Ok(())
    }
}

impl GameStore for SqliteGameStore {
    fn init_game_state(
        &self,
        session_id: String,
    ) -> BoxFuture<'static, StorageResult<GameStateEntity>> {
        let store = self.clone();
        Box::pin(async move { store.init_state(&session_id).await.map_err(Into::into) })
    }

    fn save_game_state(&self, state: GameStateUpdate) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_state(state).await.map_err(Into::into) })
    }

    fn save_board_layout(
        &self,
        session_id: String,
        board_state: Option<String>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .save_layout(&session_id, board_state)
                .await
                .map_err(Into::into)
        })
    }

    fn find_game_state(
        &self,
        session_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<GameStateEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_state(&session_id).await.map_err(Into::into) })
    }

    fn seed_questions(&self, questions: Vec<NewQuestion>) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.seed(questions).await.map_err(Into::into) })
    }

    fn random_question(
        &self,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.pick_question(round_num).await.map_err(Into::into) })
    }

    fn find_question(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.question_by_id(id).await.map_err(Into::into) })
    }

    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.all_questions().await.map_err(Into::into) })
    }

    fn mark_cell_opened(
        &self,
        cell: NewOpenedCell,
    ) -> BoxFuture<'static, StorageResult<MarkOutcome>> {
        let store = self.clone();
        Box::pin(async move { store.mark_opened(cell).await.map_err(Into::into) })
    }

    fn list_opened_cells(
        &self,
        session_id: String,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<OpenedCellEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .opened_cells(&session_id, round_num)
                .await
                .map_err(Into::into)
        })
    }

    fn clear_opened_cells(
        &self,
        session_id: String,
        round_num: i64,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .clear_opened(&session_id, round_num)
                .await
                .map_err(Into::into)
        })
    }

    fn list_players(
        &self,
        session_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.roster(&session_id).await.map_err(Into::into) })
    }

    fn add_player(&self, player: NewPlayer) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move { store.append_player(player).await.map_err(Into::into) })
    }

    fn update_player(
        &self,
        session_id: String,
        update: PlayerUpdate,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .change_player(&session_id, update)
                .await
                .map_err(Into::into)
        })
    }

    fn remove_player(
        &self,
        session_id: String,
        player_id: i64,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_player(&session_id, player_id)
                .await
                .map_err(Into::into)
        })
    }

    fn reset_players(
        &self,
        session_id: String,
        names: Vec<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .replace_roster(&session_id, names)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.reconnect().await.map_err(Into::into) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        let pool = self.pool.clone();
        Box::pin(async move { pool.close().await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    async fn store() -> SqliteGameStore {
        SqliteGameStore::connect(SqliteConfig::in_memory())
            .await
            .expect("in-memory store")
    }

    fn question(round_num: i64, text: &str, answer: &str) -> NewQuestion {
        NewQuestion {
            round_num,
            question_text: text.into(),
            answer: answer.into(),
            theme: "Музыкальные жанры".into(),
        }
    }

    fn cell(session_id: &str, round_num: i64, row: i64, col: i64, value: &str) -> NewOpenedCell {
        NewOpenedCell {
            session_id: session_id.into(),
            round_num,
            row,
            col,
            cell_value: value.into(),
        }
    }

    fn new_player(session_id: &str, name: Option<&str>) -> NewPlayer {
        NewPlayer {
            session_id: session_id.into(),
            player_name: name.map(Into::into),
            placeholder_prefix: "Игрок".into(),
        }
    }

    fn seats(players: &[PlayerEntity]) -> Vec<i64> {
        players.iter().map(|player| player.position).collect()
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let store = store().await;
        ensure_schema(&store.pool).await.unwrap();
        ensure_schema(&store.pool).await.unwrap();
    }

    #[tokio::test]
    async fn init_creates_a_fresh_session() {
        let store = store().await;
        let state = store.init_state("s1").await.unwrap();

        assert_eq!(state.session_id, "s1");
        assert_eq!(state.current_round, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_cell, None);
        assert_eq!(state.revealed_cells, None);
        assert_eq!(state.board_state, None);
        assert!(state.created_at.is_some());
    }

    #[tokio::test]
    async fn init_never_resets_saved_progress() {
        let store = store().await;
        store.init_state("s1").await.unwrap();
        store
            .save_state(GameStateUpdate {
                session_id: "s1".into(),
                current_round: 3,
                current_cell: Some("4,5".into()),
                score: 42,
                revealed_cells: Some("[[0,1]]".into()),
                board_state: Some("[[1,2],[3,\"⭐\"]]".into()),
            })
            .await
            .unwrap();

        let state = store.init_state("s1").await.unwrap();
        assert_eq!(state.current_round, 3);
        assert_eq!(state.score, 42);
        assert_eq!(state.current_cell.as_deref(), Some("4,5"));
        assert_eq!(state.board_state.as_deref(), Some("[[1,2],[3,\"⭐\"]]"));
    }

    #[tokio::test]
    async fn save_replaces_every_field_and_keeps_creation_time() {
        let store = store().await;
        let created = store.init_state("s1").await.unwrap();
        store
            .save_state(GameStateUpdate {
                session_id: "s1".into(),
                current_round: 2,
                current_cell: None,
                score: 7,
                revealed_cells: None,
                board_state: None,
            })
            .await
            .unwrap();

        let state = store.find_state("s1").await.unwrap().unwrap();
        assert_eq!(state.current_round, 2);
        assert_eq!(state.score, 7);
        assert_eq!(state.created_at, created.created_at);
    }

    #[tokio::test]
    async fn board_layout_creates_missing_session_and_keeps_progress() {
        let store = store().await;
        store
            .save_layout("fresh", Some("[[1]]".into()))
            .await
            .unwrap();
        let fresh = store.find_state("fresh").await.unwrap().unwrap();
        assert_eq!(fresh.current_round, 1);
        assert_eq!(fresh.board_state.as_deref(), Some("[[1]]"));

        store
            .save_state(GameStateUpdate {
                session_id: "fresh".into(),
                current_round: 4,
                current_cell: None,
                score: 10,
                revealed_cells: None,
                board_state: None,
            })
            .await
            .unwrap();
        store
            .save_layout("fresh", Some("[[2]]".into()))
            .await
            .unwrap();

        let state = store.find_state("fresh").await.unwrap().unwrap();
        assert_eq!(state.current_round, 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.board_state.as_deref(), Some("[[2]]"));
    }

    #[tokio::test]
    async fn missing_session_is_none() {
        let store = store().await;
        assert!(store.find_state("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeding_twice_inserts_nothing_the_second_time() {
        let store = store().await;
        let catalog = vec![
            question(1, "Q1", "Блюз"),
            question(1, "Q2", "Регги"),
            question(2, "Q3", "Гитара"),
        ];

        assert_eq!(store.seed(catalog.clone()).await.unwrap(), 3);
        assert_eq!(store.seed(catalog).await.unwrap(), 0);
        assert_eq!(store.all_questions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn random_question_stays_within_the_round() {
        let store = store().await;
        store
            .seed(vec![
                question(1, "Q1", "A1"),
                question(1, "Q2", "A2"),
                question(2, "Q3", "A3"),
            ])
            .await
            .unwrap();

        for _ in 0..20 {
            let picked = store.pick_question(1).await.unwrap().unwrap();
            assert_eq!(picked.round_num, 1);
        }
        assert!(store.pick_question(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn question_lookup_by_id() {
        let store = store().await;
        store.seed(vec![question(1, "Q1", "Блюз")]).await.unwrap();
        let listed = store.all_questions().await.unwrap();

        let found = store.question_by_id(listed[0].id).await.unwrap().unwrap();
        assert_eq!(found.answer, "Блюз");
        assert!(store.question_by_id(9_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn a_cell_opens_once_per_round_regardless_of_value() {
        let store = store().await;

        assert_eq!(
            store.mark_opened(cell("s1", 1, 2, 3, "17")).await.unwrap(),
            MarkOutcome::Opened
        );
        assert_eq!(
            store.mark_opened(cell("s1", 1, 2, 3, "17")).await.unwrap(),
            MarkOutcome::AlreadyOpened
        );
        assert_eq!(
            store.mark_opened(cell("s1", 1, 2, 3, "⭐")).await.unwrap(),
            MarkOutcome::AlreadyOpened
        );
        // Same coordinates in another round or session are independent.
        assert_eq!(
            store.mark_opened(cell("s1", 2, 2, 3, "17")).await.unwrap(),
            MarkOutcome::Opened
        );
        assert_eq!(
            store.mark_opened(cell("s2", 1, 2, 3, "17")).await.unwrap(),
            MarkOutcome::Opened
        );

        let opened = store.opened_cells("s1", 1).await.unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!((opened[0].row, opened[0].col), (2, 3));
        assert_eq!(opened[0].cell_value, "17");
    }

    #[tokio::test]
    async fn clearing_a_round_allows_reopening() {
        let store = store().await;
        store.mark_opened(cell("s1", 1, 0, 0, "1")).await.unwrap();
        store.mark_opened(cell("s1", 1, 0, 1, "2")).await.unwrap();
        store.mark_opened(cell("s1", 2, 0, 0, "3")).await.unwrap();

        assert_eq!(store.clear_opened("s1", 1).await.unwrap(), 2);
        assert!(store.opened_cells("s1", 1).await.unwrap().is_empty());
        assert_eq!(store.opened_cells("s1", 2).await.unwrap().len(), 1);
        assert_eq!(
            store.mark_opened(cell("s1", 1, 0, 0, "1")).await.unwrap(),
            MarkOutcome::Opened
        );
    }

    #[tokio::test]
    async fn opened_cells_are_listed_in_insertion_order() {
        let store = store().await;
        for (row, col) in [(3, 3), (0, 1), (2, 0)] {
            store
                .mark_opened(cell("s1", 1, row, col, "x"))
                .await
                .unwrap();
        }

        let coords: Vec<_> = store
            .opened_cells("s1", 1)
            .await
            .unwrap()
            .into_iter()
            .map(|cell| (cell.row, cell.col))
            .collect();
        assert_eq!(coords, vec![(3, 3), (0, 1), (2, 0)]);
    }

    #[tokio::test]
    async fn concurrent_reveals_have_a_single_winner() {
        let store = Arc::new(store().await);

        let handles: Vec<_> = (0..8)
            .map(|attempt| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .mark_cell_opened(cell("race", 1, 4, 4, &attempt.to_string()))
                        .await
                })
            })
            .collect();

        let mut opened = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                MarkOutcome::Opened => opened += 1,
                MarkOutcome::AlreadyOpened => rejected += 1,
            }
        }

        assert_eq!(opened, 1);
        assert_eq!(rejected, 7);
    }

    #[tokio::test]
    async fn players_are_appended_with_placeholder_names() {
        let store = store().await;
        let first = store.append_player(new_player("s1", None)).await.unwrap();
        let second = store
            .append_player(new_player("s1", Some("Аня")))
            .await
            .unwrap();
        let third = store.append_player(new_player("s1", None)).await.unwrap();
        let other = store.append_player(new_player("s2", None)).await.unwrap();

        assert_eq!((first.position, first.player_name.as_str()), (1, "Игрок 1"));
        assert_eq!((second.position, second.player_name.as_str()), (2, "Аня"));
        assert_eq!((third.position, third.player_name.as_str()), (3, "Игрок 3"));
        assert_eq!(other.position, 1);
        assert_eq!(first.score, 0);
    }

    #[tokio::test]
    async fn removing_a_player_keeps_seats_dense() {
        let store = store().await;
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(
                store
                    .append_player(new_player("s1", Some(name)))
                    .await
                    .unwrap()
                    .id,
            );
        }

        assert!(store.delete_player("s1", ids[1]).await.unwrap());
        let roster = store.roster("s1").await.unwrap();
        assert_eq!(seats(&roster), vec![1, 2, 3]);
        let names: Vec<_> = roster.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);

        assert!(store.delete_player("s1", ids[0]).await.unwrap());
        let next = store.append_player(new_player("s1", None)).await.unwrap();
        assert_eq!(next.position, 3);
        assert_eq!(seats(&store.roster("s1").await.unwrap()), vec![1, 2, 3]);

        assert!(!store.delete_player("s1", 9_999).await.unwrap());
    }

    #[tokio::test]
    async fn update_changes_score_and_optionally_name() {
        let store = store().await;
        let player = store
            .append_player(new_player("s1", Some("Аня")))
            .await
            .unwrap();

        let scored = store
            .change_player(
                "s1",
                PlayerUpdate {
                    player_id: player.id,
                    score: 15,
                    player_name: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!((scored.score, scored.player_name.as_str()), (15, "Аня"));

        let renamed = store
            .change_player(
                "s1",
                PlayerUpdate {
                    player_id: player.id,
                    score: 20,
                    player_name: Some("Маша".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!((renamed.score, renamed.player_name.as_str()), (20, "Маша"));

        // A player id from another session does not match.
        let foreign = store
            .change_player(
                "s2",
                PlayerUpdate {
                    player_id: player.id,
                    score: 0,
                    player_name: None,
                },
            )
            .await
            .unwrap();
        assert!(foreign.is_none());
    }

    #[tokio::test]
    async fn reset_recreates_the_roster() {
        let store = store().await;
        for name in ["A", "B", "C"] {
            store
                .append_player(new_player("s1", Some(name)))
                .await
                .unwrap();
        }

        let players = store
            .replace_roster("s1", vec!["Игрок 1".into(), "Игрок 2".into()])
            .await
            .unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(seats(&players), vec![1, 2]);
        assert!(players.iter().all(|player| player.score == 0));
        assert_eq!(store.roster("s1").await.unwrap(), players);
    }

    #[tokio::test]
    async fn health_and_close() {
        let store = store().await;
        store.ping().await.unwrap();
        store.reconnect().await.unwrap();
        GameStore::close(&store).await;
        assert!(store.ping().await.is_err());
    }
}
