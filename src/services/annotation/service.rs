//! Text analysis service.
//!
//! Runs the external pipeline, the semantic tagger when one is configured,
//! and normalizes the result. Shared by the HTTP server and the CLI.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::normalizer::{Normalizer, NormalizerConfig};
use super::types::AnalysisError;
use crate::config::Settings;
use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::services::nlp::{NlpPipeline, UdpipeClient};
use crate::services::semantic::{LexiconTagger, SemanticTagger};

/// Service for annotating text.
#[derive(Clone)]
pub struct AnnotationService {
    pipeline: Arc<dyn NlpPipeline>,
    tagger: Option<Arc<dyn SemanticTagger>>,
    fallback_on_tagger_silence: bool,
}

impl AnnotationService {
    pub fn new(pipeline: Arc<dyn NlpPipeline>) -> Self {
        Self {
            pipeline,
            tagger: None,
            fallback_on_tagger_silence: false,
        }
    }

    /// UDPipe pipeline plus the configured lexicon, if it loads.
    ///
    /// A lexicon that fails to load is logged and left out, so every token is
    /// classified by the lexical rules instead.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let pipeline = UdpipeClient::new(settings.pipeline.clone())?;
        let mut service = Self::new(Arc::new(pipeline))
            .with_fallback_on_tagger_silence(settings.fallback_on_tagger_silence);

        if let Some(ref path) = settings.lexicon_path {
            match LexiconTagger::from_path(path) {
                Ok(tagger) => {
                    info!("Semantic lexicon loaded: {} entries", tagger.len());
                    service = service.with_tagger(Arc::new(tagger));
                }
                Err(e) => warn!("Semantic lexicon unavailable ({}): {}", path.display(), e),
            }
        }
        Ok(service)
    }

    /// Use an external semantic tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn SemanticTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Classify tokens the tagger leaves untagged with the lexical rules.
    pub fn with_fallback_on_tagger_silence(mut self, enabled: bool) -> Self {
        self.fallback_on_tagger_silence = enabled;
        self
    }

    pub fn pipeline(&self) -> &dyn NlpPipeline {
        self.pipeline.as_ref()
    }

    pub fn tagger(&self) -> Option<&dyn SemanticTagger> {
        self.tagger.as_deref()
    }

    pub fn has_semantic_tagger(&self) -> bool {
        self.tagger.is_some()
    }

    /// Analyze one request. Any malformed token fails the whole analysis.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        if request.text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let raw_tokens = self.pipeline.analyze(&request.text).await?;
        debug!(
            "Pipeline '{}' produced {} tokens",
            self.pipeline.name(),
            raw_tokens.len()
        );

        let tags = match &self.tagger {
            Some(tagger) => tagger.tag(&raw_tokens),
            None => Vec::new(),
        };

        let normalizer = Normalizer::new(NormalizerConfig {
            use_external_tagger: self.has_semantic_tagger(),
            fallback_on_tagger_silence: self.fallback_on_tagger_silence,
        });
        let tokens = normalizer.normalize_all(&raw_tokens, &tags)?;

        info!(
            "Analyzed corpus '{}': {} tokens",
            request.corpus_name,
            tokens.len()
        );
        Ok(AnalysisResponse::new(
            tokens,
            request.corpus_name.clone(),
            self.has_semantic_tagger(),
        ))
    }
}
