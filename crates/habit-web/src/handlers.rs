//! HTTP request handlers: landing page, health check, and static assets.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use rust_embed::Embed;
use tracing::debug;

use habit_core::api::HealthResponse;

use crate::state::LandingPage;

// ============================================================
// Embedded static assets
// ============================================================

#[derive(Embed)]
#[folder = "assets"]
struct StaticAssets;

// ============================================================
// Landing page
// ============================================================

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String)
    )
)]
pub(crate) async fn handle_landing(State(page): State<LandingPage>) -> Html<axum::body::Bytes> {
    Html(page.bytes())
}

// ============================================================
// Health
// ============================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is running", body = HealthResponse)
    )
)]
pub(crate) async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ============================================================
// Static assets
// ============================================================

pub(crate) async fn serve_asset(Path(path): Path<String>) -> Response {
    match StaticAssets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.essence_str().to_owned())],
                Body::from(file.data),
            )
                .into_response()
        }
        None => {
            debug!(path, "asset not found");
            handle_not_found().await.into_response()
        }
    }
}

pub(crate) async fn handle_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}
