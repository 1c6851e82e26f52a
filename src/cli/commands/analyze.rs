//! Text analysis command.

use std::io::Read;
use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::AnalysisRequest;
use crate::services::annotation::AnnotationService;

fn read_input(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Annotate text and print the result.
pub async fn cmd_analyze(
    settings: &Settings,
    text: Option<String>,
    file: Option<&Path>,
    corpus_name: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut request = AnalysisRequest::new(read_input(text, file)?);
    if let Some(name) = corpus_name {
        request = request.with_corpus_name(name);
    }

    let service = AnnotationService::from_settings(settings)?;
    let response = service.analyze(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} {} tokens in '{}' (semantic tags: {})",
        style("✓").green(),
        response.num_tokens,
        response.corpus_name,
        if response.has_semantic_tagger {
            "lexicon"
        } else {
            "rules"
        }
    );
    println!(
        "{}",
        style(format!(
            "{:>4}  {:<16} {:<16} {:<6} {:<6} {:<10} {:>4}  {}",
            "#", "WORD", "LEMMA", "POS", "TAG", "DEP", "HEAD", "SEM"
        ))
        .bold()
    );
    for (i, token) in response.tokens.iter().enumerate() {
        let word = if token.is_punct {
            style(token.word.clone()).dim()
        } else if token.is_stop {
            style(token.word.clone()).cyan()
        } else {
            style(token.word.clone())
        };
        println!(
            "{:>4}  {:<16} {:<16} {:<6} {:<6} {:<10} {:>4}  {}",
            i,
            word,
            token.lemma,
            token.pos,
            token.tag,
            token.dep,
            token.head,
            style(&token.semantic).yellow()
        );
    }
    Ok(())
}
