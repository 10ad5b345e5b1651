// lopdf-backed text extraction.
//
// Pages are extracted one at a time in ascending page number so a single
// broken content stream costs us that page, not the whole document. Pages
// that yield an empty string are skipped; other page text is kept exactly as
// lopdf returns it.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, info, warn};

use super::traits::{ExtractedText, TextExtractor};
use crate::error::{AnalysisError, Result};

/// Default extractor built on lopdf's per-page text extraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        if bytes.is_empty() {
            return Err(AnalysisError::Extraction("empty input buffer".to_string()));
        }

        let mut doc = Document::load_mem(bytes)
            .map_err(|e| AnalysisError::Extraction(format!("invalid PDF: {e}")))?;

        // Owner-password-only PDFs open with an empty user password
        if doc.is_encrypted() {
            doc.decrypt("")
                .map_err(|e| AnalysisError::Extraction(format!("encrypted PDF: {e}")))?;
        }

        let pages = doc.get_pages();
        let page_count = pages.len();

        // BTreeMap keys are already in ascending page order
        let mut page_texts: Vec<String> = Vec::with_capacity(page_count);
        for &page_number in pages.keys() {
            match doc.extract_text(&[page_number]) {
                Ok(text) if text.is_empty() => {
                    debug!(page = page_number, "Page has no extractable text, skipping");
                }
                Ok(text) => page_texts.push(text),
                Err(e) => {
                    warn!(page = page_number, error = %e, "Failed to extract page text, skipping");
                }
            }
        }

        let pages_with_text = page_texts.len();
        let text = page_texts.join("\n");
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        info!(
            pages = page_count,
            pages_with_text,
            chars = text.chars().count(),
            "Extracted PDF text"
        );

        Ok(ExtractedText {
            text,
            pages_with_text,
            page_count,
        })
    }
}

/// Read a PDF from a local path into memory.
///
/// A missing or unreadable file is reported as an extraction failure, the
/// same way a corrupt buffer is.
pub fn load_pdf(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        AnalysisError::Extraction(format!("failed to read {}: {e}", path.display()))
    })
}
