//! PDF phrase highlighting.
//!
//! The PDF library is a collaborator behind `PdfHighlighter`. The built-in
//! backend is `PdfiumHighlighter`, bound once to the system Pdfium library.

mod pdfium;

pub use pdfium::PdfiumHighlighter;

use thiserror::Error;

/// Errors from PDF highlighting.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("PDF support not available: {0}")]
    Unavailable(String),
    #[error("No phrases provided")]
    NoPhrases,
    #[error("Invalid highlight color '{0}'")]
    InvalidColor(String),
    #[error("Could not open PDF: {0}")]
    InvalidPdf(String),
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Highlight color as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for HighlightColor {
    fn default() -> Self {
        Self::YELLOW
    }
}

impl HighlightColor {
    pub const YELLOW: Self = Self {
        red: 0xFF,
        green: 0xFF,
        blue: 0x00,
    };

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(value: &str) -> Result<Self, HighlightError> {
        let invalid = || HighlightError::InvalidColor(value.to_string());
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// A highlighted copy of an uploaded PDF.
#[derive(Debug, Clone)]
pub struct HighlightedPdf {
    pub bytes: Vec<u8>,
    /// Number of highlight annotations added across all pages.
    pub highlight_count: usize,
}

/// Trait for pluggable PDF highlighting backends.
pub trait PdfHighlighter: Send + Sync {
    /// Backend identifier (e.g. "pdfium").
    fn backend_id(&self) -> &str;

    /// Add a highlight over every occurrence of every phrase on every page.
    fn highlight(
        &self,
        pdf: Vec<u8>,
        phrases: &[String],
        color: HighlightColor,
    ) -> Result<HighlightedPdf, HighlightError>;
}

/// Drop blank phrases; fail if nothing is left to search for.
pub fn searchable_phrases(phrases: &[String]) -> Result<Vec<&str>, HighlightError> {
    let phrases: Vec<&str> = phrases
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();
    if phrases.is_empty() {
        return Err(HighlightError::NoPhrases);
    }
    Ok(phrases)
}

/// Download name for a highlighted upload: `report.pdf` -> `report_highlighted.pdf`.
pub fn highlighted_filename(upload_name: Option<&str>) -> String {
    let name = upload_name
        .map(|n| n.rsplit(['/', '\\']).next().unwrap_or(n))
        .filter(|n| !n.is_empty())
        .unwrap_or("document.pdf");
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    let stem: String = stem
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if matches!(c, '"' | ';' | ',') { '_' } else { c })
        .collect();
    let stem = if stem.trim().is_empty() { "document" } else { stem.as_str() };
    format!("{}_highlighted.pdf", stem)
}
