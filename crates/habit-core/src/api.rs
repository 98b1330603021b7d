//! JSON API types.

use serde::Serialize;
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the server answers.
    #[schema(example = "ok")]
    pub status: String,
    /// API version (e.g. "0.1.0").
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
            version: crate::VERSION.to_owned(),
        }
    }
}
