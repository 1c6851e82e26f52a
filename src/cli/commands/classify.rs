//! Rule-based classification command.

use console::style;

use crate::models::PartOfSpeech;
use crate::services::semantic::fallback::lexical_match;
use crate::services::semantic::classify;

pub fn cmd_classify(lemma: &str, pos: &str) -> anyhow::Result<()> {
    let pos = pos.to_uppercase();
    if PartOfSpeech::from_str(&pos).is_none() {
        eprintln!(
            "{} '{}' is not a Universal POS tag; using the default code",
            style("!").yellow(),
            pos
        );
    }

    let code = classify(lemma, &pos);
    match lexical_match(lemma) {
        Some(rule) => println!("{}  {} (lexical: {})", style(code).green().bold(), lemma, rule.name),
        None => println!("{}  {} (by part of speech: {})", style(code).green().bold(), lemma, pos),
    }
    Ok(())
}
