//! Error types for the annotation pipeline.

use thiserror::Error;

use crate::services::nlp::PipelineError;

/// What is wrong with a raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProblem {
    /// A required field was absent or empty.
    MissingField(&'static str),
    /// The governor index points past the end of the token sequence.
    HeadOutOfRange { head: usize, len: usize },
}

impl std::fmt::Display for TokenProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenProblem::MissingField(field) => write!(f, "missing required field '{}'", field),
            TokenProblem::HeadOutOfRange { head, len } => {
                write!(f, "head {} is outside a sequence of {} tokens", head, len)
            }
        }
    }
}

fn position(index: &Option<usize>) -> String {
    index.map(|i| format!(" {}", i)).unwrap_or_default()
}

/// A raw pipeline token could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed token{}: {problem}", position(.index))]
pub struct MalformedTokenError {
    /// Position in the token sequence, when known.
    pub index: Option<usize>,
    pub problem: TokenProblem,
}

impl MalformedTokenError {
    pub fn missing(field: &'static str) -> Self {
        Self {
            index: None,
            problem: TokenProblem::MissingField(field),
        }
    }

    /// Attach the token's position.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Errors from a full text analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No text provided")]
    EmptyText,

    #[error("NLP pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Malformed(#[from] MalformedTokenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_without_position() {
        let err = MalformedTokenError::missing("lemma");
        assert_eq!(
            err.to_string(),
            "Malformed token: missing required field 'lemma'"
        );
    }

    #[test]
    fn test_message_with_position() {
        let err = MalformedTokenError::missing("dep").at(4);
        assert_eq!(
            err.to_string(),
            "Malformed token 4: missing required field 'dep'"
        );
    }
}
