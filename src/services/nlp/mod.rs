//! External NLP pipeline: tokenization, tagging, lemmatization and parsing.
//!
//! The pipeline itself is a collaborator behind the `NlpPipeline` trait. The
//! built-in `UdpipeClient` talks to a UDPipe REST service and reads its
//! CoNLL-U output.

pub mod conllu;
mod stopwords;
mod udpipe;

pub use stopwords::{is_punctuation, is_stop_word};
pub use udpipe::{PipelineConfig, UdpipeClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RawToken;

/// Errors from the external pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Trait for pluggable NLP pipelines.
#[async_trait]
pub trait NlpPipeline: Send + Sync {
    /// Human-readable pipeline identifier (e.g. "udpipe").
    fn name(&self) -> &str;

    /// Processing components the pipeline runs, in order.
    fn components(&self) -> Vec<String>;

    /// Analyze text into document-ordered tokens.
    async fn analyze(&self, text: &str) -> Result<Vec<RawToken>, PipelineError>;
}
