mod access_log;
mod config;
mod handlers;
mod openapi;
mod state;

use std::net::SocketAddr;
use std::process;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use access_log::AccessLogLayer;
use config::Args;
use openapi::ApiDoc;
use state::LandingPage;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("habit_web=info")),
        )
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            process::exit(1);
        }
    };
    runtime.block_on(async_main(args));
}

async fn async_main(args: Args) {
    info!(
        version = habit_core::VERSION,
        revision = habit_core::GIT_REVISION,
        "starting habit tracker"
    );

    let addr = match args.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "bad configuration");
            process::exit(1);
        }
    };
    let cors = match config::cors_layer(&args.cors_origins) {
        Ok(cors) => cors,
        Err(e) => {
            error!(error = %e, "bad configuration");
            process::exit(1);
        }
    };
    info!(origins = ?args.cors_origins, "CORS enabled");

    let page = LandingPage::render(&args.title);
    info!(title = %args.title, bytes = page.len(), "landing page rendered");

    let app = build_router(page, cors).into_make_service_with_connect_info::<SocketAddr>();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            process::exit(1);
        }
    };
    info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        process::exit(1);
    }
}

/// Routes and middleware. Request flows outside-in: compression, CORS,
/// access log, then the handlers.
fn build_router(page: LandingPage, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::handle_landing))
        .route("/health", get(handlers::handle_health))
        .route("/assets/{*path}", get(handlers::serve_asset))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::handle_not_found)
        .with_state(page)
        .layer(AccessLogLayer)
        .layer(cors)
        .layer(CompressionLayer::new())
}
