//! Application-level configuration loading: board geometry, symbols, cosmetic styles and
//! the answer matching policy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LALA_GAME_CONFIG_PATH";
const DEFAULT_ROWS: u32 = 10;
const DEFAULT_COLS: u32 = 10;
const DEFAULT_ROUND_COUNTERS: [u32; 6] = [0, 20, 20, 20, 20, 10];
const DEFAULT_SYMBOLS: [&str; 10] = ["🙂", "👍", "👏", "⭐", "❤️", "🎵", "🎶", "☀️", "☁️", "☂️"];
const DEFAULT_PLAYER_PREFIX: &str = "Игрок";

/// How a submitted answer is compared with the expected one, after trimming and lowercasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMatching {
    /// Both normalized answers must be equal.
    #[default]
    Exact,
    /// One normalized answer must contain the other. Empty submissions never match.
    Substring,
}

/// Cosmetic style maps forwarded untouched to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub body: IndexMap<String, String>,
    pub cell: IndexMap<String, String>,
    pub hover_cell: IndexMap<String, String>,
    pub revealed_cell: IndexMap<String, String>,
    pub number_cell: IndexMap<String, String>,
    pub symbol_cell: IndexMap<String, String>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            body: style(&[(
                "background",
                "linear-gradient(135deg, #1a2a6c, #b21f1f, #fdbb2d)",
            )]),
            cell: style(&[
                ("width", "70px"),
                ("height", "70px"),
                ("background", "linear-gradient(145deg, #ff8c00, #ff6600)"),
                ("border_radius", "8px"),
                ("font_size", "2rem"),
                ("font_weight", "bold"),
                ("color", "#000080"),
                ("box_shadow", "0 4px 8px rgba(0, 0, 0, 0.3)"),
                ("transition", "all 0.3s ease"),
            ]),
            hover_cell: style(&[
                ("transform", "scale(1.05)"),
                ("box_shadow", "0 6px 12px rgba(0, 0, 0, 0.4)"),
                ("background", "linear-gradient(145deg, #ff9c20, #ff7620)"),
            ]),
            revealed_cell: style(&[
                ("background", "linear-gradient(145deg, #11cb6a, #25fcd5)"),
                ("cursor", "default"),
            ]),
            number_cell: style(&[("color", "#000080")]),
            symbol_cell: style(&[("color", "initial")]),
        }
    }
}

fn style(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    rows: u32,
    cols: u32,
    symbols: Vec<String>,
    round_counters: Vec<u32>,
    styles: StyleSettings,
    answer_matching: AnswerMatching,
    player_name_prefix: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        rows = config.rows,
                        cols = config.cols,
                        answer_matching = ?config.answer_matching,
                        "loaded game configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "invalid config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document where every field is optional.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(contents)?;
        Self::try_from(raw)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn total_cells(&self) -> u32 {
        self.rows * self.cols
    }

    /// Cells that hide a symbol rather than a question.
    pub fn num_symbols(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Cells that hide a question number.
    pub fn num_questions(&self) -> u32 {
        self.total_cells() - self.num_symbols()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Question cells per round, index 0 unused.
    pub fn round_counters(&self) -> &[u32] {
        &self.round_counters
    }

    pub fn styles(&self) -> &StyleSettings {
        &self.styles
    }

    pub fn answer_matching(&self) -> AnswerMatching {
        self.answer_matching
    }

    pub fn player_name_prefix(&self) -> &str {
        &self.player_name_prefix
    }

    /// Placeholder name given to the player seated at `position`.
    pub fn placeholder_player_name(&self, position: i64) -> String {
        format!("{} {}", self.player_name_prefix, position)
    }

    /// Builder used by tests and embedders to pick a matching policy.
    pub fn with_answer_matching(mut self, answer_matching: AnswerMatching) -> Self {
        self.answer_matching = answer_matching;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| (*s).to_owned()).collect(),
            round_counters: DEFAULT_ROUND_COUNTERS.to_vec(),
            styles: StyleSettings::default(),
            answer_matching: AnswerMatching::default(),
            player_name_prefix: DEFAULT_PLAYER_PREFIX.to_owned(),
        }
    }
}

/// Reasons a configuration file is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board must have at least one row and one column")]
    EmptyBoard,
    #[error("{symbols} symbols do not fit in {cells} cells")]
    TooManySymbols { symbols: usize, cells: u32 },
    #[error("player name prefix must not be blank")]
    BlankPrefix,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    rows: Option<u32>,
    cols: Option<u32>,
    symbols: Option<Vec<String>>,
    round_counters: Option<Vec<u32>>,
    styles: Option<StyleSettings>,
    answer_matching: Option<AnswerMatching>,
    player_name_prefix: Option<String>,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let defaults = AppConfig::default();
        let rows = raw.rows.unwrap_or(defaults.rows);
        let cols = raw.cols.unwrap_or(defaults.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }

        let symbols = raw.symbols.unwrap_or(defaults.symbols);
        let cells = rows.saturating_mul(cols);
        if symbols.len() > cells as usize {
            return Err(ConfigError::TooManySymbols {
                symbols: symbols.len(),
                cells,
            });
        }

        let player_name_prefix = match raw.player_name_prefix {
            Some(prefix) if prefix.trim().is_empty() => return Err(ConfigError::BlankPrefix),
            Some(prefix) => prefix.trim().to_owned(),
            None => defaults.player_name_prefix,
        };

        Ok(Self {
            rows,
            cols,
            symbols,
            round_counters: raw.round_counters.unwrap_or(defaults.round_counters),
            styles: raw.styles.unwrap_or(defaults.styles),
            answer_matching: raw.answer_matching.unwrap_or(defaults.answer_matching),
            player_name_prefix,
        })
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_ten_by_ten_board() {
        let config = AppConfig::default();
        assert_eq!(config.total_cells(), 100);
        assert_eq!(config.num_symbols(), 10);
        assert_eq!(config.num_questions(), 90);
        assert_eq!(config.round_counters(), &[0, 20, 20, 20, 20, 10]);
        assert_eq!(config.answer_matching(), AnswerMatching::Exact);
        assert_eq!(config.placeholder_player_name(3), "Игрок 3");
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let config = AppConfig::from_json(
            r#"{"rows": 8, "answer_matching": "substring", "player_name_prefix": " Команда "}"#,
        )
        .unwrap();

        assert_eq!(config.rows(), 8);
        assert_eq!(config.cols(), 10);
        assert_eq!(config.num_questions(), 70);
        assert_eq!(config.answer_matching(), AnswerMatching::Substring);
        assert_eq!(config.placeholder_player_name(1), "Команда 1");
    }

    #[test]
    fn style_maps_keep_their_order() {
        let keys: Vec<_> = AppConfig::default()
            .styles()
            .cell
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys.first().map(String::as_str), Some("width"));
        assert_eq!(keys.last().map(String::as_str), Some("transition"));
    }

    #[test]
    fn more_symbols_than_cells_is_rejected() {
        let err = AppConfig::from_json(r#"{"rows": 1, "cols": 2, "symbols": ["a", "b", "c"]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TooManySymbols { symbols: 3, cells: 2 }));
    }

    #[test]
    fn degenerate_documents_are_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{"rows": 0}"#),
            Err(ConfigError::EmptyBoard)
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"player_name_prefix": "  "}"#),
            Err(ConfigError::BlankPrefix)
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"answer_matching": "fuzzy"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
