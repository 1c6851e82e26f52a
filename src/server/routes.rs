//! Router configuration for the web server.

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let static_files = Router::new()
        .fallback_service(ServeDir::new(state.frontend.static_dir()))
        .layer(middleware::from_fn(refuse_hidden_files));
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/service-worker.js", get(handlers::service_worker))
        .route("/manifest.json", get(handlers::manifest))
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze_text))
        .route("/highlight_pdf", post(handlers::highlight_pdf))
        .nest("/static", static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Dotfiles and dot-directories are never served.
async fn refuse_hidden_files(request: Request, next: Next) -> Response {
    if is_hidden_path(request.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

fn is_hidden_path(path: &str) -> bool {
    path.to_ascii_lowercase()
        .replace("%2e", ".")
        .split(['/', '\\'])
        .any(|segment| segment.starts_with('.'))
}
