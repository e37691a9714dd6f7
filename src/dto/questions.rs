use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dao::models::QuestionEntity, dto::validation::validate_session_id};

/// Draw a question of the given round.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GetQuestionRequest {
    /// Accepted for logging only; questions are not tracked per session.
    #[serde(default)]
    #[validate(custom(function = "validate_session_id"))]
    pub session_id: Option<String>,
    pub round_num: i64,
}

/// Question shown to the players, without its answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionPrompt {
    pub question_id: i64,
    pub question_text: String,
}

impl From<QuestionEntity> for QuestionPrompt {
    fn from(question: QuestionEntity) -> Self {
        Self {
            question_id: question.id,
            question_text: question.question_text,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CheckAnswerRequest {
    pub question_id: i64,
    /// Required; kept optional so a missing value is reported as a 400 by the service.
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct CheckAnswerResponse {
    pub correct: bool,
    /// Expected answer as stored in the catalog.
    pub correct_answer: String,
}

/// Catalog entry including its answer, for the host screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDto {
    pub id: i64,
    pub round_num: i64,
    pub question_text: String,
    pub answer: String,
    pub theme: String,
}

impl From<QuestionEntity> for QuestionDto {
    fn from(question: QuestionEntity) -> Self {
        Self {
            id: question.id,
            round_num: question.round_num,
            question_text: question.question_text,
            answer: question.answer,
            theme: question.theme,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCatalogResponse {
    pub questions: Vec<QuestionDto>,
}
