use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::config::ConfigResponse, services::config_service, state::SharedState};

/// Board configuration served to the frontend.
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    responses((status = 200, description = "Board geometry, symbols and styles", body = ConfigResponse))
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    Json(config_service::configuration(&state))
}

pub fn router() -> Router<SharedState> {
    Router::new().route("/api/config", get(get_config))
}
