//! Token models: what the pipeline hands us and what we hand back.

use serde::{Deserialize, Serialize};

/// Semantic code for tokens no rule or tagger could classify.
pub const UNCLASSIFIED: &str = "Z99";

/// A token as produced by the external NLP pipeline.
///
/// Fields are optional because the pipeline may leave columns unspecified;
/// the normalizer rejects tokens with a missing required field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    /// Surface form.
    pub text: Option<String>,
    /// Coarse part-of-speech (UPOS).
    pub pos: Option<String>,
    /// Fine-grained, pipeline-specific tag.
    pub tag: Option<String>,
    /// Dependency relation to the governor.
    pub dep: Option<String>,
    /// Document-wide index of the governor (self for the root).
    pub head: Option<usize>,
    /// Dictionary base form.
    pub lemma: Option<String>,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl RawToken {
    /// Build a token with every field populated.
    pub fn new(
        text: &str,
        pos: &str,
        tag: &str,
        dep: &str,
        head: usize,
        lemma: &str,
    ) -> Self {
        Self {
            text: Some(text.to_string()),
            pos: Some(pos.to_string()),
            tag: Some(tag.to_string()),
            dep: Some(dep.to_string()),
            head: Some(head),
            lemma: Some(lemma.to_string()),
            is_stop: false,
            is_punct: false,
        }
    }

    pub fn with_flags(mut self, is_stop: bool, is_punct: bool) -> Self {
        self.is_stop = is_stop;
        self.is_punct = is_punct;
        self
    }
}

/// Semantic tagger output for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SemanticTags {
    /// Ranked codes, best first.
    Tagged(Vec<String>),
    /// The tagger produced nothing for this token.
    #[default]
    Untagged,
}

impl SemanticTags {
    /// Top-ranked code, if any.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Self::Tagged(codes) => codes.first().map(|c| c.as_str()),
            Self::Untagged => None,
        }
    }
}

impl From<Vec<String>> for SemanticTags {
    fn from(codes: Vec<String>) -> Self {
        if codes.is_empty() {
            Self::Untagged
        } else {
            Self::Tagged(codes)
        }
    }
}

/// One annotated token in an analysis response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    pub word: String,
    pub pos: String,
    pub tag: String,
    pub semantic: String,
    pub dep: String,
    pub head: usize,
    pub lemma: String,
    pub is_stop: bool,
    pub is_punct: bool,
}
