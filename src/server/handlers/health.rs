//! Health check endpoint.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};

use super::super::AppState;

/// Report which collaborators are active.
pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let pipeline = state.annotation.pipeline();
    let mut pipes = pipeline.components();
    if let Some(tagger) = state.annotation.tagger() {
        pipes.push(tagger.tagger_id().to_string());
    }
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let semantic_tagger = state.annotation.has_semantic_tagger();
    let pdf = state.highlighter.is_some();

    // spacy/pymusas/pymupdf are the keys the browser client reads
    Json(serde_json::json!({
        "status": "ok",
        "message": "Backend ONLINE",
        "spacy": true,
        "pymusas": semantic_tagger,
        "pymupdf": pdf,
        "pipeline": pipeline.name(),
        "semantic_tagger": semantic_tagger,
        "pdf": pdf,
        "pipes": pipes,
        "host": host,
    }))
}
