use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/health` route.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,
    /// "connected" or "disconnected".
    pub database: String,
}

impl HealthResponse {
    /// Storage answered its ping.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
        }
    }

    /// Storage is missing or did not answer.
    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            database: "disconnected".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.database == "connected"
    }
}
