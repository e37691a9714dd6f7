use crate::{dto::config::ConfigResponse, state::SharedState};

/// Board configuration served to the frontend. Does not need storage.
pub fn configuration(state: &SharedState) -> ConfigResponse {
    ConfigResponse::from(state.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[test]
    fn exposes_geometry_even_in_degraded_mode() {
        let state = AppState::new(AppConfig::default());
        let config = configuration(&state);

        assert_eq!(config.settings.total_cells, 100);
        assert_eq!(config.settings.num_questions, 90);
        assert_eq!(config.settings.num_symbols, 10);
        assert_eq!(config.symbols.len(), 10);
        assert_eq!(config.cell_style.get("width").map(String::as_str), Some("70px"));
    }
}
