//! Question draws, answer checking and catalog seeding.

use tracing::{debug, info};

use crate::{
    config::AnswerMatching,
    dao::{game_store::GameStore, models::NewQuestion, storage::StorageResult},
    dto::questions::{
        CheckAnswerRequest, CheckAnswerResponse, GetQuestionRequest, QuestionCatalogResponse,
        QuestionPrompt,
    },
    error::ServiceError,
    state::SharedState,
};

/// Pick a random question of the requested round.
pub async fn get_question(
    state: &SharedState,
    request: GetQuestionRequest,
) -> Result<QuestionPrompt, ServiceError> {
    let store = state.require_game_store().await?;
    let question = store
        .random_question(request.round_num)
        .await?
        .ok_or_else(|| ServiceError::NotFound("No questions available for this round".into()))?;

    debug!(
        session_id = request.session_id.as_deref().unwrap_or_default(),
        round_num = request.round_num,
        question_id = question.id,
        "question drawn"
    );
    Ok(question.into())
}

/// Compare a submitted answer with the catalog using the configured policy.
pub async fn check_answer(
    state: &SharedState,
    request: CheckAnswerRequest,
) -> Result<CheckAnswerResponse, ServiceError> {
    let Some(submitted) = request.answer else {
        return Err(ServiceError::InvalidInput("answer is required".into()));
    };

    let store = state.require_game_store().await?;
    let question = store
        .find_question(request.question_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Question not found".into()))?;

    let correct = answer_matches(state.config().answer_matching(), &question.answer, &submitted);
    Ok(CheckAnswerResponse {
        correct,
        correct_answer: question.answer,
    })
}

/// Dump the whole catalog in insertion order.
pub async fn list_questions(state: &SharedState) -> Result<QuestionCatalogResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let questions = store.list_questions().await?;
    Ok(QuestionCatalogResponse {
        questions: questions.into_iter().map(Into::into).collect(),
    })
}

/// Insert the catalog entries missing from storage.
pub async fn seed_catalog(store: &dyn GameStore, catalog: Vec<NewQuestion>) -> StorageResult<u64> {
    let total = catalog.len();
    let inserted = store.seed_questions(catalog).await?;
    info!(total, inserted, "question catalog seeded");
    Ok(inserted)
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Whether `submitted` is accepted for `expected` once both are trimmed and lowercased.
pub fn answer_matches(policy: AnswerMatching, expected: &str, submitted: &str) -> bool {
    let expected = normalize(expected);
    let submitted = normalize(submitted);

    match policy {
        AnswerMatching::Exact => expected == submitted,
        AnswerMatching::Substring => {
            !submitted.is_empty() && (expected.contains(&submitted) || submitted.contains(&expected))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        services::test_support::{ready_state, ready_state_with},
    };

    #[test]
    fn exact_matching_ignores_case_and_surrounding_spaces() {
        assert!(answer_matches(AnswerMatching::Exact, "Блюз", "  блюз "));
        assert!(answer_matches(AnswerMatching::Exact, "Элвис Пресли", "ЭЛВИС ПРЕСЛИ"));
        assert!(!answer_matches(AnswerMatching::Exact, "Элвис Пресли", "Элвис"));
        assert!(!answer_matches(AnswerMatching::Exact, "Блюз", ""));
    }

    #[test]
    fn substring_matching_accepts_partial_answers() {
        assert!(answer_matches(AnswerMatching::Substring, "Элвис Пресли", "пресли"));
        assert!(answer_matches(AnswerMatching::Substring, "Блюз", "это блюз"));
        assert!(!answer_matches(AnswerMatching::Substring, "Блюз", "рок"));
        assert!(!answer_matches(AnswerMatching::Substring, "Блюз", "   "));
    }

    #[tokio::test]
    async fn draws_only_from_the_requested_round() {
        let state = ready_state().await;

        let prompt = get_question(
            &state,
            GetQuestionRequest {
                session_id: Some("s1".into()),
                round_num: 1,
            },
        )
        .await
        .unwrap();
        let store = state.require_game_store().await.unwrap();
        let question = store.find_question(prompt.question_id).await.unwrap().unwrap();
        assert_eq!(question.round_num, 1);
        assert_eq!(question.question_text, prompt.question_text);

        let missing = get_question(
            &state,
            GetQuestionRequest {
                session_id: None,
                round_num: 99,
            },
        )
        .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn checks_answers_against_the_catalog() {
        let state = ready_state().await;
        let store = state.require_game_store().await.unwrap();
        let blues = store
            .list_questions()
            .await
            .unwrap()
            .into_iter()
            .find(|q| q.answer == "Блюз")
            .unwrap();

        let verdict = check_answer(
            &state,
            CheckAnswerRequest {
                question_id: blues.id,
                answer: Some("  блюз ".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            verdict,
            CheckAnswerResponse {
                correct: true,
                correct_answer: "Блюз".into()
            }
        );

        let missing_answer = check_answer(
            &state,
            CheckAnswerRequest {
                question_id: blues.id,
                answer: None,
            },
        )
        .await;
        assert!(matches!(missing_answer, Err(ServiceError::InvalidInput(_))));

        let unknown = check_answer(
            &state,
            CheckAnswerRequest {
                question_id: 123_456,
                answer: Some("x".into()),
            },
        )
        .await;
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn substring_policy_is_taken_from_the_configuration() {
        let state =
            ready_state_with(AppConfig::default().with_answer_matching(AnswerMatching::Substring))
                .await;
        let store = state.require_game_store().await.unwrap();
        let elvis = store
            .list_questions()
            .await
            .unwrap()
            .into_iter()
            .find(|q| q.answer == "Элвис Пресли")
            .unwrap();

        let verdict = check_answer(
            &state,
            CheckAnswerRequest {
                question_id: elvis.id,
                answer: Some("Пресли".into()),
            },
        )
        .await
        .unwrap();
        assert!(verdict.correct);
    }

    #[tokio::test]
    async fn lists_the_seeded_catalog() {
        let state = ready_state().await;
        let catalog = list_questions(&state).await.unwrap();
        assert_eq!(catalog.questions.len(), 90);
    }
}
