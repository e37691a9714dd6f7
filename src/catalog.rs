//! Trivia catalog seeded into storage on every successful connection.

use std::{env, fs, path::PathBuf};

use thiserror::Error;
use tracing::info;

use crate::dao::models::NewQuestion;

/// Environment variable pointing to a JSON catalog replacing the built-in one.
const QUESTIONS_PATH_ENV: &str = "LALA_GAME_QUESTIONS_PATH";
const BUILTIN_CATALOG: &str = include_str!("../data/questions.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read question catalog `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed question catalog")]
    Parse(#[from] serde_json::Error),
    #[error("question #{index} has a blank {field}")]
    Blank { index: usize, field: &'static str },
}

/// Load the catalog from [`QUESTIONS_PATH_ENV`] when set, the built-in one otherwise.
pub fn load() -> Result<Vec<NewQuestion>, CatalogError> {
    match env::var_os(QUESTIONS_PATH_ENV).filter(|path| !path.is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            let contents = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.clone(),
                source,
            })?;
            let questions = parse(&contents)?;
            info!(path = %path.display(), count = questions.len(), "loaded question catalog");
            Ok(questions)
        }
        None => builtin(),
    }
}

/// Catalog shipped with the binary: 90 questions over 5 rounds.
pub fn builtin() -> Result<Vec<NewQuestion>, CatalogError> {
    parse(BUILTIN_CATALOG)
}

fn parse(contents: &str) -> Result<Vec<NewQuestion>, CatalogError> {
    let questions: Vec<NewQuestion> = serde_json::from_str(contents)?;
    for (index, question) in questions.iter().enumerate() {
        let blank = [
            ("question_text", &question.question_text),
            ("answer", &question.answer),
            ("theme", &question.theme),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = blank {
            return Err(CatalogError::Blank { index, field });
        }
    }
    Ok(questions)
}
