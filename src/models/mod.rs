//! Data models for token annotation.

mod analysis;
mod pos;
mod token;

pub use analysis::{AnalysisRequest, AnalysisResponse, DEFAULT_CORPUS_NAME};
pub use pos::PartOfSpeech;
pub use token::{RawToken, SemanticTags, TokenAnnotation, UNCLASSIFIED};
