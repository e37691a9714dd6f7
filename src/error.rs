use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::dao::storage::{StorageError, StorageErrorKind};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Invalid input provided by the client.
    #[error("{0}")]
    InvalidInput(String),
    /// Operation conflicts with the stored data.
    #[error("{0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// The (session, round, row, col) cell was revealed before.
    #[error("Cell already opened")]
    CellAlreadyOpened,
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("{0}")]
    Conflict(String),
    /// Service unavailable or degraded.
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => {
                match source.kind() {
                    StorageErrorKind::Exhausted => warn!(error = %source, "storage pool exhausted"),
                    StorageErrorKind::Unavailable => {
                        error!(error = %source, "storage operation failed")
                    }
                }
                AppError::ServiceUnavailable(source.to_string())
            }
            ServiceError::Degraded => {
                AppError::ServiceUnavailable("storage unavailable (degraded mode)".into())
            }
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            err @ ServiceError::CellAlreadyOpened => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable failure description.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn service_errors_map_to_http_statuses() {
        assert_eq!(status_of(ServiceError::Degraded), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_of(ServiceError::NotFound("Question not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::InvalidState("ambiguous player name".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ServiceError::CellAlreadyOpened),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::Unavailable(StorageError::unavailable(
                "ping failed",
                std::io::Error::other("down"),
            ))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn cell_conflict_message_is_stable() {
        let err = AppError::from(ServiceError::CellAlreadyOpened);
        assert_eq!(err.to_string(), "Cell already opened");
    }
}
