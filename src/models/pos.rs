//! Coarse part-of-speech tags (Universal Dependencies UPOS).

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech category as reported by the NLP pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }

    /// Parse a UPOS tag. Tags outside the UD tag set (and `SPACE`) return `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADJ" => Some(Self::Adj),
            "ADP" => Some(Self::Adp),
            "ADV" => Some(Self::Adv),
            "AUX" => Some(Self::Aux),
            "CCONJ" | "CONJ" => Some(Self::Cconj),
            "DET" => Some(Self::Det),
            "INTJ" => Some(Self::Intj),
            "NOUN" => Some(Self::Noun),
            "NUM" => Some(Self::Num),
            "PART" => Some(Self::Part),
            "PRON" => Some(Self::Pron),
            "PROPN" => Some(Self::Propn),
            "PUNCT" => Some(Self::Punct),
            "SCONJ" => Some(Self::Sconj),
            "SYM" => Some(Self::Sym),
            "VERB" => Some(Self::Verb),
            "X" => Some(Self::X),
            _ => None,
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_tags() {
        for tag in [
            "ADJ", "ADP", "ADV", "AUX", "CCONJ", "DET", "INTJ", "NOUN", "NUM", "PART", "PRON",
            "PROPN", "PUNCT", "SCONJ", "SYM", "VERB", "X",
        ] {
            let pos = PartOfSpeech::from_str(tag).unwrap();
            assert_eq!(pos.as_str(), tag);
        }
    }

    #[test]
    fn test_legacy_conj_maps_to_cconj() {
        assert_eq!(PartOfSpeech::from_str("CONJ"), Some(PartOfSpeech::Cconj));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(PartOfSpeech::from_str("SPACE"), None);
        assert_eq!(PartOfSpeech::from_str("noun"), None);
    }
}
