use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the game backend.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::config::get_config,
        crate::routes::game::init_game,
        crate::routes::game::save_state,
        crate::routes::game::load_state,
        crate::routes::game::save_board_layout,
        crate::routes::questions::get_question,
        crate::routes::questions::check_answer,
        crate::routes::questions::get_all_questions,
        crate::routes::cells::mark_cell_opened,
        crate::routes::cells::get_opened_cells,
        crate::routes::cells::clear_opened_cells,
        crate::routes::players::get_players,
        crate::routes::players::add_player,
        crate::routes::players::update_player,
        crate::routes::players::remove_player,
        crate::routes::players::reset_players,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::config::AnswerMatching,
            crate::dto::StatusResponse,
            crate::dto::health::HealthResponse,
            crate::dto::config::ConfigResponse,
            crate::dto::config::BoardSettingsDto,
            crate::dto::game::InitGameRequest,
            crate::dto::game::SaveStateRequest,
            crate::dto::game::SaveBoardLayoutRequest,
            crate::dto::game::GameStateResponse,
            crate::dto::game::LoadStateResponse,
            crate::dto::questions::GetQuestionRequest,
            crate::dto::questions::QuestionPrompt,
            crate::dto::questions::CheckAnswerRequest,
            crate::dto::questions::CheckAnswerResponse,
            crate::dto::questions::QuestionDto,
            crate::dto::questions::QuestionCatalogResponse,
            crate::dto::cells::MarkCellOpenedRequest,
            crate::dto::cells::ClearOpenedCellsRequest,
            crate::dto::cells::OpenedCellDto,
            crate::dto::cells::OpenedCellsResponse,
            crate::dto::players::PlayerDto,
            crate::dto::players::PlayersResponse,
            crate::dto::players::AddPlayerRequest,
            crate::dto::players::UpdatePlayerRequest,
            crate::dto::players::RemovePlayerRequest,
            crate::dto::players::ResetPlayersRequest,
            crate::dto::players::PlayerResponse,
            crate::dto::players::ResetPlayersResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "config", description = "Board configuration"),
        (name = "game", description = "Session state persistence"),
        (name = "questions", description = "Trivia catalog"),
        (name = "cells", description = "Opened cells ledger"),
        (name = "players", description = "Session roster"),
    )
)]
pub struct ApiDoc;
