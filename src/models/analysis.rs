//! Request and response shapes for a text analysis.

use serde::{Deserialize, Serialize};

use super::TokenAnnotation;

/// Corpus label used when the client does not name one.
pub const DEFAULT_CORPUS_NAME: &str = "unnamed";

fn default_corpus_name() -> String {
    DEFAULT_CORPUS_NAME.to_string()
}

/// Text submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Missing text is treated as empty and rejected by the service.
    #[serde(default)]
    pub text: String,
    /// Informational label, echoed back untouched.
    #[serde(default = "default_corpus_name")]
    pub corpus_name: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            corpus_name: default_corpus_name(),
        }
    }

    pub fn with_corpus_name(mut self, name: impl Into<String>) -> Self {
        self.corpus_name = name.into();
        self
    }
}

/// Annotated tokens for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub tokens: Vec<TokenAnnotation>,
    pub num_tokens: usize,
    pub corpus_name: String,
    /// Whether semantic codes came from the external tagger for this analysis.
    /// The browser client reads this as `has_pymusas`.
    #[serde(rename = "has_pymusas", alias = "has_semantic_tagger")]
    pub has_semantic_tagger: bool,
}

impl AnalysisResponse {
    pub fn new(tokens: Vec<TokenAnnotation>, corpus_name: String, has_semantic_tagger: bool) -> Self {
        Self {
            num_tokens: tokens.len(),
            tokens,
            corpus_name,
            has_semantic_tagger,
        }
    }
}
