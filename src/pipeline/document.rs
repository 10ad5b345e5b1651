// Document: the immutable result of extraction.

use crate::cache::ContentKey;
use crate::extract::ExtractedText;
use crate::sentiment::split_sentences;

/// An extracted document. Built once per input buffer, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Hash of the raw PDF bytes
    pub key: ContentKey,
    /// Extracted text, pages joined by newline
    pub original_text: String,
    /// Sentences of `original_text`, in order
    pub sentences: Vec<String>,
    pub page_count: usize,
    pub pages_with_text: usize,
}

impl Document {
    pub fn from_extracted(key: ContentKey, extracted: ExtractedText) -> Self {
        let sentences = split_sentences(&extracted.text);
        Self {
            key,
            original_text: extracted.text,
            sentences,
            page_count: extracted.page_count,
            pages_with_text: extracted.pages_with_text,
        }
    }
}
