//! Text analysis endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::error_response;
use crate::models::AnalysisRequest;
use crate::services::annotation::AnalysisError;

/// Annotate the posted text.
pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected analysis body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, "No text provided");
        }
    };

    match state.annotation.analyze(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(AnalysisError::EmptyText) => {
            error_response(StatusCode::BAD_REQUEST, &AnalysisError::EmptyText.to_string())
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
