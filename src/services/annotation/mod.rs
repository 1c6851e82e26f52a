//! Token annotation: pipeline output to response annotations.

mod normalizer;
mod service;
mod types;

pub use normalizer::{Normalizer, NormalizerConfig};
pub use service::AnnotationService;
pub use types::{AnalysisError, MalformedTokenError, TokenProblem};
