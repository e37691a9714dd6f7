//! Opened-cell ledger: at most one reveal per (session, round, row, col).

use tracing::{debug, info};

use crate::{
    dao::models::{MarkOutcome, NewOpenedCell},
    dto::{
        StatusResponse,
        cells::{
            ClearOpenedCellsRequest, DEFAULT_ROUND, MarkCellOpenedRequest, OpenedCellsQuery,
            OpenedCellsResponse,
        },
        json_text,
    },
    error::ServiceError,
    state::SharedState,
};

/// Record a reveal, failing with [`ServiceError::CellAlreadyOpened`] on a repeat.
pub async fn mark_cell_opened(
    state: &SharedState,
    request: MarkCellOpenedRequest,
) -> Result<StatusResponse, ServiceError> {
    let Some(cell_value) = request.cell_value.and_then(json_text) else {
        return Err(ServiceError::InvalidInput("cell_value is required".into()));
    };

    let store = state.require_game_store().await?;
    let outcome = store
        .mark_cell_opened(NewOpenedCell {
            session_id: request.session_id.clone(),
            round_num: request.round_num,
            row: request.row,
            col: request.col,
            cell_value,
        })
        .await?;

    match outcome {
        MarkOutcome::Opened => {
            debug!(
                session_id = %request.session_id,
                round_num = request.round_num,
                row = request.row,
                col = request.col,
                "cell opened"
            );
            Ok(StatusResponse::success())
        }
        MarkOutcome::AlreadyOpened => Err(ServiceError::CellAlreadyOpened),
    }
}

pub async fn get_opened_cells(
    state: &SharedState,
    query: OpenedCellsQuery,
) -> Result<OpenedCellsResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let cells = store
        .list_opened_cells(query.session_id, query.round_num.unwrap_or(DEFAULT_ROUND))
        .await?;
    Ok(OpenedCellsResponse {
        opened_cells: cells.into_iter().map(Into::into).collect(),
    })
}

/// Forget every reveal of a round so the board can be replayed.
pub async fn clear_opened_cells(
    state: &SharedState,
    request: ClearOpenedCellsRequest,
) -> Result<StatusResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let round_num = request.round_num.unwrap_or(DEFAULT_ROUND);
    let removed = store
        .clear_opened_cells(request.session_id.clone(), round_num)
        .await?;
    info!(session_id = %request.session_id, round_num, removed, "opened cells cleared");
    Ok(StatusResponse::success())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{dto::cells::OpenedCellDto, services::test_support::ready_state};

    fn mark(row: i64, col: i64, value: Value) -> MarkCellOpenedRequest {
        MarkCellOpenedRequest {
            session_id: "s1".into(),
            round_num: 1,
            row,
            col,
            cell_value: Some(value),
        }
    }

    async fn opened(state: &SharedState, round_num: Option<i64>) -> Vec<OpenedCellDto> {
        get_opened_cells(
            state,
            OpenedCellsQuery {
                session_id: "s1".into(),
                round_num,
            },
        )
        .await
        .unwrap()
        .opened_cells
    }

    #[tokio::test]
    async fn repeated_reveal_conflicts_regardless_of_value() {
        let state = ready_state().await;
        mark_cell_opened(&state, mark(2, 3, json!(17))).await.unwrap();

        let same = mark_cell_opened(&state, mark(2, 3, json!(17))).await;
        assert!(matches!(same, Err(ServiceError::CellAlreadyOpened)));
        let other_value = mark_cell_opened(&state, mark(2, 3, json!("⭐"))).await;
        assert!(matches!(other_value, Err(ServiceError::CellAlreadyOpened)));

        assert_eq!(
            opened(&state, None).await,
            vec![OpenedCellDto {
                row: 2,
                col: 3,
                value: "17".into()
            }]
        );
    }

    #[tokio::test]
    async fn null_value_is_rejected() {
        let state = ready_state().await;
        let result = mark_cell_opened(&state, mark(0, 0, Value::Null)).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(opened(&state, Some(1)).await.is_empty());
    }

    #[tokio::test]
    async fn clearing_defaults_to_round_one_and_allows_reopening() {
        let state = ready_state().await;
        mark_cell_opened(&state, mark(0, 0, json!("☀️"))).await.unwrap();
        mark_cell_opened(
            &state,
            MarkCellOpenedRequest {
                round_num: 2,
                ..mark(0, 0, json!(5))
            },
        )
        .await
        .unwrap();

        clear_opened_cells(
            &state,
            ClearOpenedCellsRequest {
                session_id: "s1".into(),
                round_num: None,
            },
        )
        .await
        .unwrap();

        assert!(opened(&state, Some(1)).await.is_empty());
        assert_eq!(opened(&state, Some(2)).await.len(), 1);
        mark_cell_opened(&state, mark(0, 0, json!("☀️"))).await.unwrap();
    }
}
