// Error taxonomy for the analysis pipeline.
//
// Every stage returns one of these instead of panicking. The pipeline turns
// them into user-visible placeholders so one failing analysis never takes
// down the others.

use thiserror::Error;

/// Failures raised by the analysis stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The input was not a readable, parseable PDF (or the file was missing).
    #[error("could not read PDF: {0}")]
    Extraction(String),

    /// The PDF parsed fine but none of its pages yielded any text.
    #[error("no text could be extracted from the PDF")]
    EmptyText,

    /// Too few distinct terms for a word cloud layout.
    #[error("document is too short for a word cloud ({distinct} distinct terms, need {required})")]
    InsufficientData { distinct: usize, required: usize },

    /// The topic model could not be fitted.
    #[error("could not build topic model: {0}")]
    Modeling(String),

    /// Requested topic count is outside the supported range.
    #[error("number of topics must be between {min} and {max}, got {0}", min = crate::topics::MIN_TOPICS, max = crate::topics::MAX_TOPICS)]
    InvalidTopicCount(usize),
}

impl AnalysisError {
    /// True for failures that mean "nothing to analyze" rather than a fault.
    pub fn is_no_text(&self) -> bool {
        matches!(self, AnalysisError::Extraction(_) | AnalysisError::EmptyText)
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
