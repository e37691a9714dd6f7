/// Opened-cell ledger operations.
pub mod cell_service;
/// Board configuration exposed to the frontend.
pub mod config_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Session roster management.
pub mod player_service;
/// Question draws and answer checking.
pub mod question_service;
/// Session state persistence.
pub mod session_service;
/// Storage connection supervisor toggling degraded mode.
pub mod storage_supervisor;
