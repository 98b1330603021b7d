//! OpenAPI documentation definition.

use habit_core::api::HealthResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::handle_landing, crate::handlers::handle_health),
    components(schemas(HealthResponse)),
    info(
        title = "Habit Tracker API",
        version = habit_core::VERSION,
        description = "API for tracking habits and daily entries"
    )
)]
pub(crate) struct ApiDoc;
