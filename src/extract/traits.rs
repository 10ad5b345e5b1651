// Text extractor trait: pluggable extraction backend.
//
// The pipeline only needs "bytes in, page-ordered text out". The default
// implementation uses lopdf, but an OCR-backed or pdfium-backed extractor
// could be dropped in without touching the analyses.

use crate::error::Result;

/// Text pulled out of a document, pages already joined.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    /// Page texts in page order, joined by a single newline
    pub text: String,
    /// Number of pages that contributed text (empty pages are skipped)
    pub pages_with_text: usize,
    /// Total pages in the document
    pub page_count: usize,
}

/// Trait for turning a document's raw bytes into plain text.
pub trait TextExtractor {
    /// Extract text from an in-memory document.
    ///
    /// Returns `AnalysisError::Extraction` for unreadable input and
    /// `AnalysisError::EmptyText` when the document parses but has no text.
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText>;
}
