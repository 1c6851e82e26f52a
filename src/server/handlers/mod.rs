//! HTTP request handlers for the web server.

mod analyze;
mod health;
mod highlight;
mod pages;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub use analyze::analyze_text;
pub use health::health;
pub use highlight::highlight_pdf;
pub use pages::{index, manifest, service_worker};

/// `{"error": message}` with the given status.
fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
