//! PDF highlighting command.

use std::path::{Path, PathBuf};

use console::style;

use crate::config::Settings;
use crate::services::highlight::{
    highlighted_filename, HighlightColor, PdfHighlighter, PdfiumHighlighter,
};

pub async fn cmd_highlight(
    settings: &Settings,
    pdf: &Path,
    phrases: Vec<String>,
    color: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let color = HighlightColor::from_hex(color)?;
    let bytes = tokio::fs::read(pdf)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", pdf.display(), e))?;

    let library_dir = settings.pdf_library_dir.clone();
    let highlighted = tokio::task::spawn_blocking(move || {
        let highlighter = PdfiumHighlighter::bind(library_dir.as_deref())?;
        highlighter.highlight(bytes, &phrases, color)
    })
    .await??;

    let output = output.unwrap_or_else(|| {
        let name = pdf.file_name().and_then(|n| n.to_str());
        pdf.with_file_name(highlighted_filename(name))
    });
    tokio::fs::write(&output, &highlighted.bytes).await?;

    println!(
        "{} Highlighted {} occurrences -> {}",
        style("✓").green(),
        highlighted.highlight_count,
        output.display()
    );
    Ok(())
}
