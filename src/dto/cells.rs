use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{dao::models::OpenedCellEntity, dto::validation::validate_session_id};

/// Round used when a client omits `round_num` on cell ledger requests.
pub const DEFAULT_ROUND: i64 = 1;

/// Reveal of a single board cell.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MarkCellOpenedRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    pub round_num: i64,
    #[validate(range(min = 0))]
    pub row: i64,
    #[validate(range(min = 0))]
    pub col: i64,
    /// Question number or symbol hidden under the cell. Required, `null` is rejected.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub cell_value: Option<Value>,
}

/// Query string of `/api/get_opened_cells`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct OpenedCellsQuery {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    /// Defaults to round 1.
    pub round_num: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ClearOpenedCellsRequest {
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: String,
    /// Defaults to round 1.
    #[serde(default)]
    pub round_num: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct OpenedCellDto {
    pub row: i64,
    pub col: i64,
    pub value: String,
}

impl From<OpenedCellEntity> for OpenedCellDto {
    fn from(cell: OpenedCellEntity) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            value: cell.cell_value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OpenedCellsResponse {
    pub opened_cells: Vec<OpenedCellDto>,
}
