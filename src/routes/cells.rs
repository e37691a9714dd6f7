use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        StatusResponse,
        cells::{
            ClearOpenedCellsRequest, MarkCellOpenedRequest, OpenedCellsQuery, OpenedCellsResponse,
        },
    },
    error::{AppError, ErrorBody},
    routes::extract::{ValidJson, ValidQuery},
    services::cell_service,
    state::SharedState,
};

/// Routes of the opened-cell ledger.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/mark_cell_opened", post(mark_cell_opened))
        .route("/api/get_opened_cells", get(get_opened_cells))
        .route("/api/clear_opened_cells", post(clear_opened_cells))
}

/// Record a cell reveal; a cell opens once per round.
#[utoipa::path(
    post,
    path = "/api/mark_cell_opened",
    tag = "cells",
    request_body = MarkCellOpenedRequest,
    responses(
        (status = 200, description = "Cell recorded", body = StatusResponse),
        (status = 400, description = "Cell already opened or malformed request", body = ErrorBody)
    )
)]
pub async fn mark_cell_opened(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<MarkCellOpenedRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(cell_service::mark_cell_opened(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/get_opened_cells",
    tag = "cells",
    params(OpenedCellsQuery),
    responses((status = 200, description = "Cells opened during the round", body = OpenedCellsResponse))
)]
pub async fn get_opened_cells(
    State(state): State<SharedState>,
    ValidQuery(query): ValidQuery<OpenedCellsQuery>,
) -> Result<Json<OpenedCellsResponse>, AppError> {
    Ok(Json(cell_service::get_opened_cells(&state, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/clear_opened_cells",
    tag = "cells",
    request_body = ClearOpenedCellsRequest,
    responses((status = 200, description = "Round cleared", body = StatusResponse))
)]
pub async fn clear_opened_cells(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<ClearOpenedCellsRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(cell_service::clear_opened_cells(&state, payload).await?))
}
