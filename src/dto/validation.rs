//! Validation helpers for DTOs.

use validator::ValidationError;

/// Widest identifier the `game_states.session_id` column was designed for.
pub const MAX_SESSION_ID_CHARS: usize = 255;
/// Widest display name accepted for a player.
pub const MAX_PLAYER_NAME_CHARS: usize = 255;

/// Validates that a session ID is present, not blank and at most 255 characters.
///
/// The identifier is otherwise opaque: any characters are accepted.
///
/// # Examples
///
/// ```ignore
/// validate_session_id("session_1700000000000") // Ok
/// validate_session_id("   ")                   // Err - blank
/// ```
pub fn validate_session_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        let mut err = ValidationError::new("session_id_blank");
        err.message = Some("Session ID must not be empty".into());
        return Err(err);
    }

    let length = id.chars().count();
    if length > MAX_SESSION_ID_CHARS {
        let mut err = ValidationError::new("session_id_length");
        err.message = Some(
            format!("Session ID must be at most {MAX_SESSION_ID_CHARS} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates an explicit player name: at most 255 characters. Blank names are accepted and
/// replaced by a placeholder later on.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if length > MAX_PLAYER_NAME_CHARS {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_PLAYER_NAME_CHARS} characters (got {length})")
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_id_valid() {
        assert!(validate_session_id("session_1700000000000").is_ok());
        assert!(validate_session_id("сессия-1").is_ok());
        assert!(validate_session_id(&"я".repeat(255)).is_ok()); // counted in chars, not bytes
    }

    #[test]
    fn test_validate_session_id_invalid() {
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("  \t").is_err());
        assert!(validate_session_id(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_player_name() {
        assert!(validate_player_name("").is_ok());
        assert!(validate_player_name("Игрок 1").is_ok());
        assert!(validate_player_name(&"b".repeat(256)).is_err());
    }
}
