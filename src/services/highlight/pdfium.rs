//! Pdfium-backed highlighter.

use std::path::Path;

use pdfium_render::prelude::*;
use tracing::{debug, info};

use super::{searchable_phrases, HighlightColor, HighlightError, HighlightedPdf, PdfHighlighter};

fn pdf_error(e: PdfiumError) -> HighlightError {
    HighlightError::Pdf(e.to_string())
}

/// Highlighter using the Pdfium library.
///
/// Pdfium keeps global state, so bind once per process and share the value.
pub struct PdfiumHighlighter {
    pdfium: Pdfium,
}

impl PdfiumHighlighter {
    /// Bind to Pdfium in `library_dir`, or to the system library when `None`.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self, HighlightError> {
        let bindings = match library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| HighlightError::Unavailable(e.to_string()))?;

        debug!("Bound to Pdfium");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

/// Bounding rectangles of every occurrence of every phrase on a page.
/// Each occurrence may span several text segments (e.g. across a line break).
fn occurrences(page: &PdfPage, phrases: &[&str]) -> Result<Vec<Vec<PdfRect>>, PdfiumError> {
    let text = page.text()?;
    let options = PdfSearchOptions::new();
    let mut found = Vec::new();

    for phrase in phrases {
        let search = text.search(phrase, &options)?;
        for segments in search.iter(PdfSearchDirection::SearchForward) {
            let rects: Vec<PdfRect> = segments.iter().map(|s| s.bounds()).collect();
            if !rects.is_empty() {
                found.push(rects);
            }
        }
    }
    Ok(found)
}

fn union(rects: &[PdfRect]) -> PdfRect {
    let mut bottom = f32::MAX;
    let mut left = f32::MAX;
    let mut top = f32::MIN;
    let mut right = f32::MIN;
    for rect in rects {
        bottom = bottom.min(rect.bottom().value);
        left = left.min(rect.left().value);
        top = top.max(rect.top().value);
        right = right.max(rect.right().value);
    }
    PdfRect::new_from_values(bottom, left, top, right)
}

impl PdfHighlighter for PdfiumHighlighter {
    fn backend_id(&self) -> &str {
        "pdfium"
    }

    fn highlight(
        &self,
        pdf: Vec<u8>,
        phrases: &[String],
        color: HighlightColor,
    ) -> Result<HighlightedPdf, HighlightError> {
        let phrases = searchable_phrases(phrases)?;
        let document = self
            .pdfium
            .load_pdf_from_byte_vec(pdf, None)
            .map_err(|e| HighlightError::InvalidPdf(e.to_string()))?;
        let stroke = PdfColor::new(color.red, color.green, color.blue, 255);
        let mut highlight_count = 0;

        for (page_index, mut page) in document.pages().iter().enumerate() {
            let found = occurrences(&page, &phrases).map_err(pdf_error)?;
            if found.is_empty() {
                continue;
            }
            debug!("Page {}: {} matches", page_index + 1, found.len());

            for rects in found {
                let mut annotation = page
                    .annotations_mut()
                    .create_highlight_annotation()
                    .map_err(pdf_error)?;
                annotation.set_bounds(union(&rects)).map_err(pdf_error)?;
                for rect in &rects {
                    annotation
                        .attachment_points_mut()
                        .create_attachment_point_at_end(PdfQuadPoints::from_rect(rect))
                        .map_err(pdf_error)?;
                }
                annotation.set_stroke_color(stroke).map_err(pdf_error)?;
                highlight_count += 1;
            }
        }

        let bytes = document.save_to_bytes().map_err(pdf_error)?;
        info!("Highlighted {} occurrences", highlight_count);
        Ok(HighlightedPdf {
            bytes,
            highlight_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_covers_all_segments() {
        let rects = [
            PdfRect::new_from_values(700.0, 72.0, 712.0, 300.0),
            PdfRect::new_from_values(686.0, 72.0, 698.0, 120.0),
        ];
        let merged = union(&rects);
        assert_eq!(merged.bottom().value, 686.0);
        assert_eq!(merged.left().value, 72.0);
        assert_eq!(merged.top().value, 712.0);
        assert_eq!(merged.right().value, 300.0);
    }

    #[test]
    fn test_bind_missing_library_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfiumHighlighter::bind(Some(dir.path()));
        assert!(matches!(result, Err(HighlightError::Unavailable(_))));
    }
}
