use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Location of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/docs";
/// Location of the raw OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

/// Swagger UI plus the OpenAPI document it renders. Needs no state of its own.
pub fn router() -> Router<SharedState> {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}
