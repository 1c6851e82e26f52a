//! Turns raw pipeline tokens into response annotations.

use crate::models::{RawToken, SemanticTags, TokenAnnotation, UNCLASSIFIED};
use crate::services::semantic::classify;

use super::types::{MalformedTokenError, TokenProblem};

/// How semantic codes are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// The external semantic tagger ran for this analysis.
    pub use_external_tagger: bool,
    /// When the tagger ran but left a token untagged, classify it with the
    /// lexical rules instead of reporting `Z99`.
    pub fallback_on_tagger_silence: bool,
}

/// Builds one `TokenAnnotation` per raw token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, MalformedTokenError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MalformedTokenError::missing(field))
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Normalize a single token.
    pub fn normalize(
        &self,
        raw: &RawToken,
        tags: &SemanticTags,
    ) -> Result<TokenAnnotation, MalformedTokenError> {
        let word = required(&raw.text, "text")?;
        let pos = required(&raw.pos, "pos")?;
        let tag = required(&raw.tag, "tag")?;
        let dep = required(&raw.dep, "dep")?;
        let lemma = required(&raw.lemma, "lemma")?;
        let head = raw.head.ok_or_else(|| MalformedTokenError::missing("head"))?;

        let semantic = self.semantic_code(lemma, pos, tags);

        Ok(TokenAnnotation {
            word: word.to_string(),
            pos: pos.to_string(),
            tag: tag.to_string(),
            semantic,
            dep: dep.to_string(),
            head,
            lemma: lemma.to_string(),
            is_stop: raw.is_stop,
            is_punct: raw.is_punct,
        })
    }

    /// Normalize a whole token sequence, failing on the first bad token.
    ///
    /// `tags` is indexed in parallel with `tokens`; missing entries count as
    /// untagged.
    pub fn normalize_all(
        &self,
        tokens: &[RawToken],
        tags: &[SemanticTags],
    ) -> Result<Vec<TokenAnnotation>, MalformedTokenError> {
        let untagged = SemanticTags::Untagged;
        let len = tokens.len();

        tokens
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let token_tags = tags.get(index).unwrap_or(&untagged);
                let annotation = self
                    .normalize(raw, token_tags)
                    .map_err(|e| e.at(index))?;
                if annotation.head >= len {
                    return Err(MalformedTokenError {
                        index: Some(index),
                        problem: TokenProblem::HeadOutOfRange {
                            head: annotation.head,
                            len,
                        },
                    });
                }
                Ok(annotation)
            })
            .collect()
    }

    fn semantic_code(&self, lemma: &str, pos: &str, tags: &SemanticTags) -> String {
        if !self.config.use_external_tagger {
            return classify(lemma, pos).to_string();
        }
        match tags.primary() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ if self.config.fallback_on_tagger_silence => classify(lemma, pos).to_string(),
            _ => UNCLASSIFIED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(codes: &[&str]) -> SemanticTags {
        SemanticTags::Tagged(codes.iter().map(|c| c.to_string()).collect())
    }

    fn with_tagger() -> Normalizer {
        Normalizer::new(NormalizerConfig {
            use_external_tagger: true,
            fallback_on_tagger_silence: false,
        })
    }

    #[test]
    fn test_copies_pipeline_fields() {
        let raw = RawToken::new("Cats", "NOUN", "NNS", "nsubj", 1, "cat").with_flags(false, false);
        let annotation = Normalizer::default()
            .normalize(&raw, &SemanticTags::Untagged)
            .unwrap();

        assert_eq!(annotation.word, "Cats");
        assert_eq!(annotation.pos, "NOUN");
        assert_eq!(annotation.tag, "NNS");
        assert_eq!(annotation.dep, "nsubj");
        assert_eq!(annotation.head, 1);
        assert_eq!(annotation.lemma, "cat");
        assert_eq!(annotation.semantic, "O2");
    }

    #[test]
    fn test_first_external_tag_wins() {
        let raw = RawToken::new("walked", "VERB", "VBD", "ROOT", 0, "walk");
        let annotation = with_tagger().normalize(&raw, &tagged(&["M1", "Z5"])).unwrap();
        assert_eq!(annotation.semantic, "M1");
    }

    #[test]
    fn test_external_tag_not_replaced_by_lexical_rule() {
        // "love" would be E1.1+ lexically
        let raw = RawToken::new("love", "VERB", "VBP", "ROOT", 0, "love");
        let annotation = with_tagger().normalize(&raw, &tagged(&["S3.2"])).unwrap();
        assert_eq!(annotation.semantic, "S3.2");
    }

    #[test]
    fn test_tagger_silence_is_unclassified() {
        let raw = RawToken::new("love", "VERB", "VBP", "ROOT", 0, "love");
        let annotation = with_tagger()
            .normalize(&raw, &SemanticTags::Untagged)
            .unwrap();
        assert_eq!(annotation.semantic, "Z99");

        let annotation = with_tagger().normalize(&raw, &tagged(&[])).unwrap();
        assert_eq!(annotation.semantic, "Z99");
    }

    #[test]
    fn test_tagger_silence_with_fallback() {
        let normalizer = Normalizer::new(NormalizerConfig {
            use_external_tagger: true,
            fallback_on_tagger_silence: true,
        });
        let raw = RawToken::new("love", "VERB", "VBP", "ROOT", 0, "love");
        let annotation = normalizer.normalize(&raw, &SemanticTags::Untagged).unwrap();
        assert_eq!(annotation.semantic, "E1.1+");
    }

    #[test]
    fn test_tags_ignored_without_tagger() {
        let raw = RawToken::new("cats", "NOUN", "NNS", "obj", 0, "cat");
        let annotation = Normalizer::default()
            .normalize(&raw, &tagged(&["M1"]))
            .unwrap();
        assert_eq!(annotation.semantic, "O2");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let complete = RawToken::new("cats", "NOUN", "NNS", "obj", 0, "cat");
        let normalizer = Normalizer::default();

        let mut raw = complete.clone();
        raw.lemma = None;
        assert_eq!(
            normalizer.normalize(&raw, &SemanticTags::Untagged),
            Err(MalformedTokenError::missing("lemma"))
        );

        let mut raw = complete.clone();
        raw.text = Some(String::new());
        assert_eq!(
            normalizer.normalize(&raw, &SemanticTags::Untagged),
            Err(MalformedTokenError::missing("text"))
        );

        let mut raw = complete;
        raw.head = None;
        assert_eq!(
            normalizer.normalize(&raw, &SemanticTags::Untagged),
            Err(MalformedTokenError::missing("head"))
        );
    }

    #[test]
    fn test_sequence_preserves_order_and_heads() {
        let tokens = vec![
            RawToken::new("I", "PRON", "PRP", "nsubj", 1, "I"),
            RawToken::new("love", "VERB", "VBP", "ROOT", 1, "love"),
            RawToken::new("cats", "NOUN", "NNS", "dobj", 1, "cat"),
        ];
        let annotations = Normalizer::default().normalize_all(&tokens, &[]).unwrap();

        assert_eq!(annotations.len(), 3);
        let words: Vec<&str> = annotations.iter().map(|a| a.word.as_str()).collect();
        assert_eq!(words, vec!["I", "love", "cats"]);
        let heads: Vec<usize> = annotations.iter().map(|a| a.head).collect();
        assert_eq!(heads, vec![1, 1, 1]);
        let semantics: Vec<&str> = annotations.iter().map(|a| a.semantic.as_str()).collect();
        assert_eq!(semantics, vec!["Z8", "E1.1+", "O2"]);
    }

    #[test]
    fn test_sequence_fails_on_first_bad_token() {
        let mut bad = RawToken::new("cats", "NOUN", "NNS", "obj", 0, "cat");
        bad.dep = None;
        let tokens = vec![
            RawToken::new("I", "PRON", "PRP", "nsubj", 0, "I"),
            bad,
        ];

        let err = Normalizer::default().normalize_all(&tokens, &[]).unwrap_err();
        assert_eq!(err.index, Some(1));
        assert_eq!(err.problem, TokenProblem::MissingField("dep"));
    }

    #[test]
    fn test_sequence_rejects_dangling_head() {
        let tokens = vec![RawToken::new("Hi", "INTJ", "UH", "ROOT", 3, "hi")];
        let err = Normalizer::default().normalize_all(&tokens, &[]).unwrap_err();
        assert_eq!(err.problem, TokenProblem::HeadOutOfRange { head: 3, len: 1 });
    }

    #[test]
    fn test_sequence_with_partial_tags() {
        let tokens = vec![
            RawToken::new("I", "PRON", "PRP", "nsubj", 1, "I"),
            RawToken::new("run", "VERB", "VBP", "ROOT", 1, "run"),
        ];
        let annotations = with_tagger()
            .normalize_all(&tokens, &[tagged(&["Z8mf"])])
            .unwrap();
        assert_eq!(annotations[0].semantic, "Z8mf");
        assert_eq!(annotations[1].semantic, "Z99");
    }

    #[test]
    fn test_semantic_never_empty() {
        let tokens = vec![
            RawToken::new(".", "PUNCT", ".", "punct", 0, "."),
            RawToken::new("zork", "X", "FW", "dep", 0, "zork"),
        ];
        let all_tags = [
            vec![tagged(&[""]), SemanticTags::Untagged],
            vec![],
        ];
        for use_external_tagger in [true, false] {
            for fallback_on_tagger_silence in [true, false] {
                let normalizer = Normalizer::new(NormalizerConfig {
                    use_external_tagger,
                    fallback_on_tagger_silence,
                });
                for tags in &all_tags {
                    for annotation in normalizer.normalize_all(&tokens, tags).unwrap() {
                        assert!(!annotation.semantic.is_empty());
                    }
                }
            }
        }
    }
}
