use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{dto::health::HealthResponse, services::health_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Database connected", body = HealthResponse),
        (status = 503, description = "Database disconnected", body = HealthResponse)
    )
)]
/// Return the current health status of the backend and ping the database.
pub async fn health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    let status = health_service::health_status(&state).await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/health", get(health))
}
