//! Rule-based semantic classifier used when no external tagger output exists.
//!
//! Lexical rules are checked in a fixed order and the first vocabulary that
//! contains the lower-cased lemma wins. Tokens no rule matches get a
//! part-of-speech default.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::{PartOfSpeech, UNCLASSIFIED};

/// A closed vocabulary mapped to one semantic code.
pub struct LexicalRule {
    pub name: &'static str,
    pub code: &'static str,
    pub words: HashSet<&'static str>,
}

impl LexicalRule {
    fn new(name: &'static str, code: &'static str, words: &[&'static str]) -> Self {
        Self {
            name,
            code,
            words: words.iter().copied().collect(),
        }
    }
}

// ============================================================================
// Vocabularies, in priority order
// ============================================================================

/// Lexical rules in the order they are tried.
pub static LEXICAL_RULES: LazyLock<Vec<LexicalRule>> = LazyLock::new(|| {
    vec![
        LexicalRule::new(
            "positive_emotion",
            "E1.1+",
            &["happy", "joy", "delighted", "pleased", "excited", "love", "wonderful"],
        ),
        LexicalRule::new(
            "negative_emotion",
            "E1.1-",
            &["sad", "angry", "fear", "hate", "anxious", "worried", "upset", "depressed"],
        ),
        LexicalRule::new(
            "movement",
            "M1",
            &["go", "come", "move", "walk", "run", "travel", "arrive", "leave", "enter"],
        ),
        LexicalRule::new(
            "speech",
            "Q2.2",
            &["say", "tell", "speak", "talk", "communicate", "discuss", "mention", "ask"],
        ),
        LexicalRule::new(
            "cognition",
            "X2.1",
            &["think", "believe", "know", "understand", "consider", "realize", "remember"],
        ),
        // "wonderful" is already claimed by positive_emotion
        LexicalRule::new(
            "positive_evaluation",
            "A5.1+",
            &["good", "great", "excellent", "amazing", "beautiful", "perfect", "nice"],
        ),
        LexicalRule::new(
            "negative_evaluation",
            "A5.1-",
            &["bad", "poor", "terrible", "awful", "horrible", "ugly", "wrong", "worse"],
        ),
        LexicalRule::new(
            "temporal",
            "T1",
            &["today", "tomorrow", "yesterday", "now", "then", "soon", "later", "before", "after"],
        ),
    ]
});

/// Default code for a coarse part-of-speech when no lexical rule applies.
pub fn pos_default(pos: &str) -> &'static str {
    match PartOfSpeech::from_str(pos) {
        Some(PartOfSpeech::Noun) => "O2",
        Some(PartOfSpeech::Propn) => "Z3",
        Some(PartOfSpeech::Verb) => "A3+",
        Some(PartOfSpeech::Adj) => "A5",
        Some(PartOfSpeech::Adv) => "A13",
        Some(PartOfSpeech::Num) => "N1",
        Some(PartOfSpeech::Adp) | Some(PartOfSpeech::Det) => "Z5",
        Some(PartOfSpeech::Pron) => "Z8",
        _ => UNCLASSIFIED,
    }
}

/// Find the lexical rule matching a lemma, if any.
pub fn lexical_match(lemma: &str) -> Option<&'static LexicalRule> {
    let lemma = lemma.to_lowercase();
    LEXICAL_RULES
        .iter()
        .find(|rule| rule.words.contains(lemma.as_str()))
}

/// Assign a semantic-domain code from a lemma and its coarse part-of-speech.
///
/// Total: every input yields a non-empty code.
pub fn classify(lemma: &str, pos: &str) -> &'static str {
    match lexical_match(lemma) {
        Some(rule) => rule.code,
        None => pos_default(pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_defaults_for_unmatched_lemma() {
        let cases = [
            ("NOUN", "O2"),
            ("PROPN", "Z3"),
            ("VERB", "A3+"),
            ("ADJ", "A5"),
            ("ADV", "A13"),
            ("NUM", "N1"),
            ("ADP", "Z5"),
            ("DET", "Z5"),
            ("PRON", "Z8"),
            ("PUNCT", "Z99"),
            ("INTJ", "Z99"),
            ("SPACE", "Z99"),
            ("", "Z99"),
        ];
        for (pos, expected) in cases {
            assert_eq!(classify("xyzzy", pos), expected, "pos {}", pos);
        }
    }

    #[test]
    fn test_positive_emotion_ignores_pos() {
        let words = &LEXICAL_RULES[0].words;
        for word in words {
            for pos in ["ADJ", "NOUN", "VERB", "X"] {
                assert_eq!(classify(word, pos), "E1.1+");
            }
        }
    }

    #[test]
    fn test_case_insensitive_lemma() {
        assert_eq!(classify("Happy", "ADJ"), "E1.1+");
        assert_eq!(classify("WALK", "VERB"), "M1");
        assert_eq!(classify("Tomorrow", "NOUN"), "T1");
    }

    #[test]
    fn test_each_rule_yields_its_code() {
        let cases = [
            ("sad", "E1.1-"),
            ("depressed", "E1.1-"),
            ("enter", "M1"),
            ("mention", "Q2.2"),
            ("remember", "X2.1"),
            ("excellent", "A5.1+"),
            ("worse", "A5.1-"),
            ("after", "T1"),
        ];
        for (lemma, expected) in cases {
            assert_eq!(classify(lemma, "X"), expected, "lemma {}", lemma);
        }
    }

    #[test]
    fn test_lexical_rule_beats_pos_default() {
        // "before" is usually ADP, which would default to Z5
        assert_eq!(classify("before", "ADP"), "T1");
        assert_eq!(classify("love", "VERB"), "E1.1+");
    }

    #[test]
    fn test_wonderful_resolves_to_emotion() {
        assert_eq!(classify("wonderful", "ADJ"), "E1.1+");
    }

    #[test]
    fn test_vocabularies_are_pairwise_disjoint() {
        for (i, a) in LEXICAL_RULES.iter().enumerate() {
            for b in LEXICAL_RULES.iter().skip(i + 1) {
                let overlap: Vec<_> = a.words.intersection(&b.words).collect();
                assert!(
                    overlap.is_empty(),
                    "{} and {} share {:?}",
                    a.name,
                    b.name,
                    overlap
                );
            }
        }
    }

    #[test]
    fn test_rule_order() {
        let codes: Vec<&str> = LEXICAL_RULES.iter().map(|r| r.code).collect();
        assert_eq!(
            codes,
            vec!["E1.1+", "E1.1-", "M1", "Q2.2", "X2.1", "A5.1+", "A5.1-", "T1"]
        );
    }

    #[test]
    fn test_never_empty() {
        for lemma in ["", " ", "love", "zzz", "ÄÖÜ"] {
            for pos in ["", "NOUN", "?"] {
                assert!(!classify(lemma, pos).is_empty());
            }
        }
    }
}
