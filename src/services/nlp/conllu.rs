//! CoNLL-U reader.
//!
//! Produces one `RawToken` per syntactic word. Multi-word token ranges
//! (`1-2`) and empty nodes (`1.1`) are skipped. Heads are rewritten from
//! sentence-relative, 1-based ids to document-wide 0-based indices, and the
//! sentence root points at itself.

use crate::models::RawToken;

use super::stopwords::{is_punctuation, is_stop_word};
use super::PipelineError;

const UNSPECIFIED: &str = "_";

/// ID through DEPREL; DEPS and MISC are never read.
const MIN_COLUMNS: usize = 8;

/// One word line of a sentence, before head resolution.
struct WordLine {
    form: String,
    lemma: Option<String>,
    upos: Option<String>,
    xpos: Option<String>,
    head: Option<usize>,
    deprel: Option<String>,
}

fn column(value: &str) -> Option<String> {
    match value {
        "" | UNSPECIFIED => None,
        v => Some(v.to_string()),
    }
}

fn parse_word_line(line_no: usize, columns: &[&str]) -> Result<WordLine, PipelineError> {
    if columns.len() < MIN_COLUMNS {
        return Err(PipelineError::Parse(format!(
            "line {}: expected at least {} columns, found {}",
            line_no,
            MIN_COLUMNS,
            columns.len()
        )));
    }

    let form = columns[1].to_string();
    // An underscore token legitimately has "_" as its lemma
    let lemma = if columns[2] == UNSPECIFIED && form == UNSPECIFIED {
        Some(form.clone())
    } else {
        column(columns[2])
    };
    let head = match columns[6] {
        UNSPECIFIED | "" => None,
        h => Some(h.parse::<usize>().map_err(|_| {
            PipelineError::Parse(format!("line {}: invalid head '{}'", line_no, h))
        })?),
    };

    let upos = column(columns[3]);
    // Treebanks without language-specific tags leave XPOS empty
    let xpos = column(columns[4]).or_else(|| upos.clone());

    Ok(WordLine {
        form,
        lemma,
        upos,
        xpos,
        head,
        deprel: column(columns[7]),
    })
}

fn flush_sentence(
    sentence: &mut Vec<WordLine>,
    tokens: &mut Vec<RawToken>,
) -> Result<(), PipelineError> {
    let offset = tokens.len();
    let len = sentence.len();

    for (position, word) in sentence.drain(..).enumerate() {
        let head = match word.head {
            Some(0) => Some(offset + position),
            Some(h) if h <= len => Some(offset + h - 1),
            Some(h) => {
                return Err(PipelineError::Parse(format!(
                    "head {} outside sentence of {} words",
                    h, len
                )))
            }
            None => None,
        };

        let is_punct =
            word.upos.as_deref() == Some("PUNCT") || is_punctuation(&word.form);
        let is_stop = is_stop_word(&word.form);

        tokens.push(RawToken {
            text: Some(word.form).filter(|form| !form.is_empty()),
            pos: word.upos,
            tag: word.xpos,
            dep: word.deprel,
            head,
            lemma: word.lemma,
            is_stop,
            is_punct,
        });
    }
    Ok(())
}

/// Parse CoNLL-U text into document-ordered tokens.
pub fn parse(input: &str) -> Result<Vec<RawToken>, PipelineError> {
    let mut tokens = Vec::new();
    let mut sentence = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            flush_sentence(&mut sentence, &mut tokens)?;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            continue;
        }
        if id.parse::<usize>().is_err() {
            return Err(PipelineError::Parse(format!(
                "line {}: invalid word id '{}'",
                index + 1,
                id
            )));
        }

        sentence.push(parse_word_line(index + 1, &columns)?);
    }
    flush_sentence(&mut sentence, &mut tokens)?;

    Ok(tokens)
}
