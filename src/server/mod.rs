//! Web server for the annotation frontend.
//!
//! Serves the browser frontend and a small JSON API:
//! - `/analyze` token annotation
//! - `/highlight_pdf` phrase highlighting for uploaded PDFs
//! - `/health` collaborator status

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::annotation::AnnotationService;
use crate::services::highlight::{PdfHighlighter, PdfiumHighlighter};

const STATIC_SUBDIR: &str = "static";

/// Where the browser frontend lives.
#[derive(Clone, Debug)]
pub struct FrontendSettings {
    pub dir: PathBuf,
    pub index: String,
    pub backend_url_placeholder: String,
}

impl FrontendSettings {
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index)
    }

    /// Assets served under `/static`; only this subdirectory is exposed.
    pub fn static_dir(&self) -> PathBuf {
        self.dir.join(STATIC_SUBDIR)
    }
}

impl From<&Settings> for FrontendSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            dir: settings.frontend_dir.clone(),
            index: settings.frontend_index.clone(),
            backend_url_placeholder: settings.backend_url_placeholder.clone(),
        }
    }
}

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub annotation: Arc<AnnotationService>,
    /// `None` when PDF support is unavailable.
    pub highlighter: Option<Arc<dyn PdfHighlighter>>,
    pub frontend: Arc<FrontendSettings>,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build the analysis service and optional collaborators from settings.
    ///
    /// Pdfium failing to bind is logged and leaves PDF support off.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let annotation = AnnotationService::from_settings(settings)?;

        let highlighter: Option<Arc<dyn PdfHighlighter>> = if settings.pdf_enabled {
            match PdfiumHighlighter::bind(settings.pdf_library_dir.as_deref()) {
                Ok(h) => {
                    tracing::info!("PDF highlighting enabled");
                    Some(Arc::new(h))
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            annotation: Arc::new(annotation),
            highlighter,
            frontend: Arc::new(FrontendSettings::from(settings)),
            max_body_bytes: settings.max_body_bytes,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    tracing::info!(
        "Backend ready! Pipes: {:?}",
        state.annotation.pipeline().components()
    );
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
