//! Semantic-domain tagging: the external tagger seam and the rule-based fallback.

pub mod fallback;
mod lexicon;

pub use fallback::classify;
pub use lexicon::{usas_core_pos, LexiconError, LexiconTagger};

use crate::models::{RawToken, SemanticTags};

/// Trait for pluggable semantic taggers.
///
/// Implementations see the whole token sequence so they can use context, and
/// must return exactly one entry per input token, in order.
pub trait SemanticTagger: Send + Sync {
    /// Human-readable tagger identifier (e.g. "usas-lexicon").
    fn tagger_id(&self) -> &str;

    /// Tag every token of a document.
    fn tag(&self, tokens: &[RawToken]) -> Vec<SemanticTags>;
}
