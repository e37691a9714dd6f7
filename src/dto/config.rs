use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{AnswerMatching, AppConfig};

/// Board geometry derived from the configuration.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct BoardSettingsDto {
    pub rows: u32,
    pub cols: u32,
    pub total_cells: u32,
    /// Cells hiding a question number.
    pub num_questions: u32,
    /// Cells hiding a symbol.
    pub num_symbols: u32,
    /// Question cells per round; index 0 is unused.
    pub round_counters: Vec<u32>,
}

/// Everything the frontend needs to draw the board.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    pub symbols: Vec<String>,
    pub settings: BoardSettingsDto,
    #[schema(value_type = Object)]
    pub body_style: IndexMap<String, String>,
    #[schema(value_type = Object)]
    pub cell_style: IndexMap<String, String>,
    #[schema(value_type = Object)]
    pub hover_cell_style: IndexMap<String, String>,
    #[schema(value_type = Object)]
    pub revealed_cell_style: IndexMap<String, String>,
    #[schema(value_type = Object)]
    pub number_cell_style: IndexMap<String, String>,
    #[schema(value_type = Object)]
    pub symbol_cell_style: IndexMap<String, String>,
    pub answer_matching: AnswerMatching,
}

impl From<&AppConfig> for ConfigResponse {
    fn from(config: &AppConfig) -> Self {
        let styles = config.styles().clone();
        Self {
            symbols: config.symbols().to_vec(),
            settings: BoardSettingsDto {
                rows: config.rows(),
                cols: config.cols(),
                total_cells: config.total_cells(),
                num_questions: config.num_questions(),
                num_symbols: config.num_symbols(),
                round_counters: config.round_counters().to_vec(),
            },
            body_style: styles.body,
            cell_style: styles.cell,
            hover_cell_style: styles.hover_cell,
            revealed_cell_style: styles.revealed_cell,
            number_cell_style: styles.number_cell,
            symbol_cell_style: styles.symbol_cell,
            answer_matching: config.answer_matching(),
        }
    }
}
