// Analysis pipeline: extraction fans out into three isolated analyses.
//
// One normalization step produces an immutable token set; sentiment reads
// the original sentences, frequency and topics read the tokens. A failure in
// one analysis becomes a placeholder in the report instead of aborting the
// others.

pub mod document;
pub mod report;
pub mod session;

pub use document::Document;
pub use report::{AnalysisReport, FrequencyReport, Outcome, Report, SentimentReport};
pub use session::{AnalysisSession, AnalysisSettings};
