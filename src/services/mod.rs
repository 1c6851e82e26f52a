//! Service layer for CorBas.
//!
//! This module contains domain logic separated from UI concerns.
//! Services are used by both the CLI and the web server.

pub mod annotation;
pub mod highlight;
pub mod nlp;
pub mod semantic;

pub use annotation::{AnalysisError, AnnotationService};
pub use highlight::{HighlightColor, HighlightError, PdfHighlighter};
pub use nlp::{NlpPipeline, PipelineError};
pub use semantic::SemanticTagger;
