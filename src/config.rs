//! Configuration management for CorBas using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::nlp::PipelineConfig;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port when neither config nor `PORT` set one.
pub const DEFAULT_PORT: u16 = 10000;
/// Default request body limit; large enough for typical PDF uploads.
pub const DEFAULT_MAX_BODY_MB: usize = 50;
/// Frontend page served at `/`.
pub const DEFAULT_FRONTEND_INDEX: &str = "corbas.html";
/// Backend URL baked into the frontend page; rewritten per request.
pub const DEFAULT_BACKEND_URL_PLACEHOLDER: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

/// HTTP server section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Maximum request body in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body_mb: Option<usize>,
}

/// Semantic tagging section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// USAS lexicon TSV. Without one, the lexical rules classify every token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<String>,
    /// Classify tokens the lexicon leaves untagged instead of reporting Z99.
    #[serde(default)]
    pub fallback_on_tagger_silence: bool,
}

/// PDF highlighting section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the Pdfium shared library (system search path if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            library_dir: None,
        }
    }
}

/// Browser frontend section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Directory with the frontend page; assets are served from its `static/` subdirectory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url_placeholder: Option<String>,
}

/// Configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no `corbas` config file is found.
    pub async fn load() -> Self {
        match prefer::load("corbas").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring config {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path, parsed by extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(ext, &contents)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(ext: &str, contents: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Directory of the config file, if loaded from one.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - `~` and environment variables are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::full(path_str)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(path_str).into_owned());
        let path = Path::new(&expanded);

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Resolve into runtime settings.
    pub fn to_settings(&self, base_dir: &Path) -> Settings {
        let mut settings = Settings {
            pipeline: self.pipeline.clone(),
            fallback_on_tagger_silence: self.semantic.fallback_on_tagger_silence,
            pdf_enabled: self.pdf.enabled,
            frontend_dir: base_dir.to_path_buf(),
            ..Settings::default()
        };

        if let Some(ref host) = self.server.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.server.port {
            settings.port = port;
        }
        if let Some(mb) = self.server.max_body_mb {
            settings.max_body_bytes = mb * 1024 * 1024;
        }
        if let Some(ref lexicon) = self.semantic.lexicon {
            settings.lexicon_path = Some(self.resolve_path(lexicon, base_dir));
        }
        if let Some(ref dir) = self.pdf.library_dir {
            settings.pdf_library_dir = Some(self.resolve_path(dir, base_dir));
        }
        if let Some(ref dir) = self.frontend.dir {
            settings.frontend_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref index) = self.frontend.index {
            settings.frontend_index = index.clone();
        }
        if let Some(ref placeholder) = self.frontend.backend_url_placeholder {
            settings.backend_url_placeholder = placeholder.clone();
        }

        settings
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub pipeline: PipelineConfig,
    pub lexicon_path: Option<PathBuf>,
    pub fallback_on_tagger_silence: bool,
    pub pdf_enabled: bool,
    pub pdf_library_dir: Option<PathBuf>,
    pub frontend_dir: PathBuf,
    pub frontend_index: String,
    pub backend_url_placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_MB * 1024 * 1024,
            pipeline: PipelineConfig::default(),
            lexicon_path: None,
            fallback_on_tagger_silence: false,
            pdf_enabled: true,
            pdf_library_dir: None,
            frontend_dir: PathBuf::from("."),
            frontend_index: DEFAULT_FRONTEND_INDEX.to_string(),
            backend_url_placeholder: DEFAULT_BACKEND_URL_PLACEHOLDER.to_string(),
        }
    }
}

impl Settings {
    /// Apply `PORT`, `CORBAS_PIPELINE_URL` and `CORBAS_LEXICON` overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.port = port;
        }
        if let Some(url) = lookup("CORBAS_PIPELINE_URL").filter(|u| !u.is_empty()) {
            self.pipeline = self.pipeline.with_endpoint(&url);
        }
        if let Some(lexicon) = lookup("CORBAS_LEXICON").filter(|l| !l.is_empty()) {
            let expanded = shellexpand::tilde(&lexicon).into_owned();
            self.lexicon_path = Some(PathBuf::from(expanded));
        }
        self
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn frontend_index_path(&self) -> PathBuf {
        self.frontend_dir.join(&self.frontend_index)
    }
}

/// Load settings, from `config_path` if given, otherwise by discovery.
pub async fn load_settings(config_path: Option<&Path>) -> anyhow::Result<(Settings, Config)> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let settings = config.to_settings(&base_dir).with_env_overrides();
    Ok((settings, config))
}
