//! Frontend page, service worker and manifest.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use super::super::AppState;

/// Replaces any previously installed worker and clears its caches.
const UNREGISTER_SERVICE_WORKER: &str = r#"
self.addEventListener('install', () => {
    self.skipWaiting();
});

self.addEventListener('activate', event => {
    event.waitUntil(
        caches.keys().then(names => {
            return Promise.all(names.map(name => caches.delete(name)));
        }).then(() => {
            return self.registration.unregister();
        }).then(() => {
            return self.clients.matchAll();
        }).then(clients => {
            clients.forEach(client => client.navigate(client.url));
        })
    );
});
"#;

/// `{scheme}://{host}` as seen by the client.
pub fn request_origin(headers: &HeaderMap) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    };
    let scheme = header_str("x-forwarded-proto").unwrap_or("http");
    let host = header_str("x-forwarded-host")
        .or_else(|| header_str(header::HOST.as_str()))
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

/// Point the page's backend URL at this server.
pub fn rewrite_backend_url(html: &str, placeholder: &str, origin: &str) -> String {
    html.replace(
        &format!("const BACKEND_URL = '{}';", placeholder),
        &format!("const BACKEND_URL = '{}';", origin),
    )
}

/// Serve the frontend page, never cached.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let path = state.frontend.index_path();
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<h1>Error</h1><p>{}</p><p>Path: {}</p>",
                    e,
                    state.frontend.dir.display()
                )),
            )
                .into_response();
        }
    };

    let origin = request_origin(&headers);
    let body = rewrite_backend_url(&content, &state.frontend.backend_url_placeholder, &origin);
    tracing::debug!("Serving frontend with backend URL {}", origin);

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, max-age=0",
            ),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        body,
    )
        .into_response()
}

pub async fn service_worker() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        UNREGISTER_SERVICE_WORKER,
    )
}

pub async fn manifest() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "CorBas",
        "short_name": "CorBas",
        "start_url": "/",
        "display": "standalone",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_origin() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_origin(&headers), "http://localhost");

        headers.insert(header::HOST, HeaderValue::from_static("corbas.example:8080"));
        assert_eq!(request_origin(&headers), "http://corbas.example:8080");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("corbas.example"));
        assert_eq!(request_origin(&headers), "https://corbas.example");
    }

    #[test]
    fn test_rewrite_backend_url() {
        let html = "<script>const BACKEND_URL = 'http://127.0.0.1:5000';</script>";
        assert_eq!(
            rewrite_backend_url(html, "http://127.0.0.1:5000", "https://corbas.example"),
            "<script>const BACKEND_URL = 'https://corbas.example';</script>"
        );
        // other occurrences of the URL are left alone
        let html = "<a href='http://127.0.0.1:5000'>dev</a>";
        assert_eq!(
            rewrite_backend_url(html, "http://127.0.0.1:5000", "https://corbas.example"),
            html
        );
    }
}
