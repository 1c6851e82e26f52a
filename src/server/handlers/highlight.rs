//! PDF highlighting endpoint.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::super::AppState;
use super::error_response;
use crate::services::highlight::{highlighted_filename, HighlightColor, HighlightError};

/// Fields of the highlight upload form.
#[derive(Debug, Default)]
struct HighlightForm {
    file: Option<(Option<String>, Vec<u8>)>,
    phrases: Option<String>,
    color: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<HighlightForm, String> {
    let mut form = HighlightForm::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| e.body_text())?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            Some("phrases") => form.phrases = Some(field.text().await.map_err(|e| e.body_text())?),
            Some("color") => form.color = Some(field.text().await.map_err(|e| e.body_text())?),
            _ => {}
        }
    }
    Ok(form)
}

fn highlight_error_status(error: &HighlightError) -> StatusCode {
    match error {
        HighlightError::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Return the uploaded PDF with every phrase occurrence highlighted.
pub async fn highlight_pdf(State(state): State<AppState>, multipart: Multipart) -> Response {
    let Some(highlighter) = state.highlighter.clone() else {
        return error_response(StatusCode::BAD_REQUEST, "PDF support not available");
    };

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    let Some((file_name, pdf)) = form.file else {
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    let phrases: Vec<String> =
        match serde_json::from_str(form.phrases.as_deref().unwrap_or("[]")) {
            Ok(phrases) => phrases,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid phrases: {}", e),
                )
            }
        };
    if phrases.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, &HighlightError::NoPhrases.to_string());
    }

    let color = match form.color.as_deref() {
        Some(hex) if !hex.trim().is_empty() => match HighlightColor::from_hex(hex) {
            Ok(color) => color,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        },
        _ => HighlightColor::default(),
    };

    let result =
        tokio::task::spawn_blocking(move || highlighter.highlight(pdf, &phrases, color)).await;

    let highlighted = match result {
        Ok(Ok(highlighted)) => highlighted,
        Ok(Err(e)) => {
            tracing::error!("Highlighting failed: {}", e);
            return error_response(highlight_error_status(&e), &e.to_string());
        }
        Err(e) => {
            tracing::error!("Highlight task failed: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    let filename = highlighted_filename(file_name.as_deref());
    tracing::info!(
        "Highlighted {} occurrences in {}",
        highlighted.highlight_count,
        filename
    );

    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (
                header::HeaderName::from_static("x-highlight-count"),
                highlighted.highlight_count.to_string(),
            ),
        ],
        highlighted.bytes,
    )
        .into_response()
}
