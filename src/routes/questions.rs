use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::questions::{
        CheckAnswerRequest, CheckAnswerResponse, GetQuestionRequest, QuestionCatalogResponse,
        QuestionPrompt,
    },
    error::{AppError, ErrorBody},
    routes::extract::ValidJson,
    services::question_service,
    state::SharedState,
};

/// Routes serving the trivia catalog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/get_question", post(get_question))
        .route("/api/check_answer", post(check_answer))
        .route("/api/get_all_questions", get(get_all_questions))
}

/// Draw a random question of a round.
#[utoipa::path(
    post,
    path = "/api/get_question",
    tag = "questions",
    request_body = GetQuestionRequest,
    responses(
        (status = 200, description = "Question drawn", body = QuestionPrompt),
        (status = 404, description = "No questions available for this round", body = ErrorBody)
    )
)]
pub async fn get_question(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<GetQuestionRequest>,
) -> Result<Json<QuestionPrompt>, AppError> {
    Ok(Json(question_service::get_question(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/check_answer",
    tag = "questions",
    request_body = CheckAnswerRequest,
    responses(
        (status = 200, description = "Verdict", body = CheckAnswerResponse),
        (status = 400, description = "Missing answer", body = ErrorBody),
        (status = 404, description = "Question not found", body = ErrorBody)
    )
)]
pub async fn check_answer(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>, AppError> {
    Ok(Json(question_service::check_answer(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/get_all_questions",
    tag = "questions",
    responses((status = 200, description = "Whole catalog", body = QuestionCatalogResponse))
)]
pub async fn get_all_questions(
    State(state): State<SharedState>,
) -> Result<Json<QuestionCatalogResponse>, AppError> {
    Ok(Json(question_service::list_questions(&state).await?))
}
