use serde::Serialize;
use serde_json::Value;
use time::{PrimitiveDateTime, format_description::well_known::Rfc3339};
use utoipa::ToSchema;

pub mod cells;
pub mod config;
pub mod game;
pub mod health;
pub mod players;
pub mod questions;
pub mod validation;

/// Acknowledgement returned by every mutating endpoint.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct StatusResponse {
    /// Always `"success"`.
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".into(),
        }
    }
}

/// SQLite stores `CURRENT_TIMESTAMP` in UTC without offset.
fn format_timestamp(value: PrimitiveDateTime) -> String {
    value
        .assume_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// Text persisted for a loosely typed client field: strings verbatim, anything else as JSON.
pub(crate) fn json_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn loose_fields_keep_strings_verbatim() {
        assert_eq!(json_text(json!("3,4")), Some("3,4".into()));
        assert_eq!(json_text(json!([[0, 1], [2, 3]])), Some("[[0,1],[2,3]]".into()));
        assert_eq!(json_text(json!(17)), Some("17".into()));
        assert_eq!(json_text(Value::Null), None);
    }

    #[test]
    fn timestamps_are_rendered_as_utc() {
        assert_eq!(
            format_timestamp(datetime!(2024-05-01 12:30:00)),
            "2024-05-01T12:30:00Z"
        );
    }
}
