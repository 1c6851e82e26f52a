//! USAS single-word lexicon tagger.
//!
//! Reads a tab-separated lexicon with a header row naming at least the
//! `lemma` and `semantic_tags` columns, plus an optional `pos` column holding
//! USAS core part-of-speech tags. Semantic tags are space-separated and ranked
//! best first.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::SemanticTagger;
use crate::models::{PartOfSpeech, RawToken, SemanticTags};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),
    #[error("Lexicon header is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("Lexicon line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("Lexicon contains no entries")]
    Empty,
}

/// Map a UPOS tag onto the USAS core tag set used by lexicon `pos` columns.
pub fn usas_core_pos(upos: &str) -> Option<&'static str> {
    let pos = PartOfSpeech::from_str(upos)?;
    Some(match pos {
        PartOfSpeech::Adj => "adj",
        PartOfSpeech::Adp => "prep",
        PartOfSpeech::Adv => "adv",
        PartOfSpeech::Aux | PartOfSpeech::Verb => "verb",
        PartOfSpeech::Cconj | PartOfSpeech::Sconj => "conj",
        PartOfSpeech::Det => "det",
        PartOfSpeech::Intj => "intj",
        PartOfSpeech::Noun | PartOfSpeech::Propn => "noun",
        PartOfSpeech::Num => "num",
        PartOfSpeech::Part => "part",
        PartOfSpeech::Pron => "pron",
        PartOfSpeech::Punct => "punc",
        PartOfSpeech::Sym | PartOfSpeech::X => "fo",
    })
}

/// Lexicon-backed semantic tagger.
#[derive(Debug, Default)]
pub struct LexiconTagger {
    /// (lower-cased lemma, USAS pos) -> ranked codes
    by_pos: HashMap<(String, String), Vec<String>>,
    /// lower-cased lemma -> ranked codes of its first entry
    any_pos: HashMap<String, Vec<String>>,
}

impl LexiconTagger {
    /// Load a lexicon file.
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let file = std::fs::File::open(path)?;
        let tagger = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            "Loaded {} lexicon entries from {}",
            tagger.len(),
            path.display()
        );
        Ok(tagger)
    }

    /// Parse a lexicon from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LexiconError> {
        let mut lines = reader.lines().enumerate();

        let (lemma_col, tags_col, pos_col) = loop {
            let Some((_, line)) = lines.next() else {
                return Err(LexiconError::Empty);
            };
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let headers: Vec<&str> = line.split('\t').map(str::trim).collect();
            let find = |name: &str| headers.iter().position(|h| *h == name);
            let lemma = find("lemma").ok_or(LexiconError::MissingColumn("lemma"))?;
            let tags =
                find("semantic_tags").ok_or(LexiconError::MissingColumn("semantic_tags"))?;
            break (lemma, tags, find("pos"));
        };

        let mut tagger = Self::default();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |col: usize| {
                fields
                    .get(col)
                    .map(|f| f.trim())
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| LexiconError::InvalidLine {
                        line: index + 1,
                        reason: format!("missing column {}", col + 1),
                    })
            };

            let lemma = field(lemma_col)?.to_lowercase();
            let codes: Vec<String> = field(tags_col)?
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let pos = pos_col.and_then(|col| field(col).ok()).map(str::to_lowercase);

            tagger.insert(lemma, pos, codes);
        }

        if tagger.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(tagger)
    }

    fn insert(&mut self, lemma: String, pos: Option<String>, codes: Vec<String>) {
        self.any_pos
            .entry(lemma.clone())
            .or_insert_with(|| codes.clone());
        if let Some(pos) = pos {
            self.by_pos.entry((lemma, pos)).or_insert(codes);
        }
    }

    pub fn len(&self) -> usize {
        self.any_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.any_pos.is_empty()
    }

    /// Ranked codes for one token, trying the most specific key first.
    fn lookup(&self, token: &RawToken) -> Option<&Vec<String>> {
        let lemma = token.lemma.as_deref().map(str::to_lowercase);
        let word = token.text.as_deref().map(str::to_lowercase);
        let pos = token.pos.as_deref().and_then(usas_core_pos);
        let keys = [lemma.as_ref(), word.as_ref()];

        if let Some(pos) = pos {
            for key in keys.iter().flatten() {
                if let Some(codes) = self.by_pos.get(&((*key).clone(), pos.to_string())) {
                    return Some(codes);
                }
            }
        }
        keys.iter().flatten().find_map(|key| self.any_pos.get(*key))
    }
}

impl SemanticTagger for LexiconTagger {
    fn tagger_id(&self) -> &str {
        "usas-lexicon"
    }

    fn tag(&self, tokens: &[RawToken]) -> Vec<SemanticTags> {
        tokens
            .iter()
            .map(|token| {
                if token.is_punct {
                    return SemanticTags::Untagged;
                }
                match self.lookup(token) {
                    Some(codes) => SemanticTags::from(codes.clone()),
                    None => SemanticTags::Untagged,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LEXICON: &str = "lemma\tsemantic_tags\tpos\n\
        run\tM1 K5.1\tverb\n\
        run\tK5.1 M1\tnoun\n\
        cat\tL2\tnoun\n\
        # comment line\n\
        \n\
        happy\tE4.1+\tadj\n";

    fn tagger() -> LexiconTagger {
        LexiconTagger::from_reader(Cursor::new(LEXICON)).unwrap()
    }

    #[test]
    fn test_pos_specific_lookup() {
        let tagger = tagger();
        let tokens = vec![
            RawToken::new("ran", "VERB", "VBD", "ROOT", 0, "run"),
            RawToken::new("run", "NOUN", "NN", "obj", 0, "run"),
        ];
        let tags = tagger.tag(&tokens);
        assert_eq!(
            tags[0],
            SemanticTags::Tagged(vec!["M1".to_string(), "K5.1".to_string()])
        );
        assert_eq!(tags[1].primary(), Some("K5.1"));
    }

    #[test]
    fn test_falls_back_to_any_pos() {
        let tagger = tagger();
        let tokens = vec![RawToken::new("Cat", "PROPN", "NNP", "nsubj", 0, "Cat")];
        // PROPN maps to noun, so this still hits the pos-specific entry
        assert_eq!(tagger.tag(&tokens)[0].primary(), Some("L2"));

        let tokens = vec![RawToken::new("happy", "ADV", "RB", "advmod", 0, "happy")];
        assert_eq!(tagger.tag(&tokens)[0].primary(), Some("E4.1+"));
    }

    #[test]
    fn test_unknown_word_is_untagged() {
        let tagger = tagger();
        let tokens = vec![RawToken::new("xyzzy", "NOUN", "NN", "ROOT", 0, "xyzzy")];
        assert_eq!(tagger.tag(&tokens), vec![SemanticTags::Untagged]);
    }

    #[test]
    fn test_punctuation_is_untagged() {
        let tagger =
            LexiconTagger::from_reader(Cursor::new("lemma\tsemantic_tags\n.\tPUNC\n")).unwrap();
        let tokens = vec![RawToken::new(".", "PUNCT", ".", "punct", 0, ".").with_flags(false, true)];
        assert_eq!(tagger.tag(&tokens), vec![SemanticTags::Untagged]);
    }

    #[test]
    fn test_one_entry_per_token() {
        let tagger = tagger();
        let tokens: Vec<RawToken> = (0..5)
            .map(|i| RawToken::new("cat", "NOUN", "NN", "dep", i, "cat"))
            .collect();
        assert_eq!(tagger.tag(&tokens).len(), 5);
    }

    #[test]
    fn test_missing_column() {
        let err = LexiconTagger::from_reader(Cursor::new("lemma\tpos\ncat\tnoun\n")).unwrap_err();
        assert!(matches!(err, LexiconError::MissingColumn("semantic_tags")));
    }

    #[test]
    fn test_empty_lexicon() {
        let err = LexiconTagger::from_reader(Cursor::new("lemma\tsemantic_tags\n")).unwrap_err();
        assert!(matches!(err, LexiconError::Empty));
    }

    #[test]
    fn test_invalid_line() {
        let err =
            LexiconTagger::from_reader(Cursor::new("lemma\tsemantic_tags\ncat\n")).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidLine { line: 2, .. }));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        std::fs::write(&path, LEXICON).unwrap();

        let tagger = LexiconTagger::from_path(&path).unwrap();
        assert_eq!(tagger.len(), 3);
        assert_eq!(tagger.tagger_id(), "usas-lexicon");
    }

    #[test]
    fn test_usas_core_pos() {
        assert_eq!(usas_core_pos("PROPN"), Some("noun"));
        assert_eq!(usas_core_pos("AUX"), Some("verb"));
        assert_eq!(usas_core_pos("ADP"), Some("prep"));
        assert_eq!(usas_core_pos("SPACE"), None);
    }
}
