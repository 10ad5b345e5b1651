// PDF text extraction: raw bytes in, plain text out.

pub mod pdf;
pub mod traits;

pub use pdf::{load_pdf, LopdfExtractor};
pub use traits::{ExtractedText, TextExtractor};
