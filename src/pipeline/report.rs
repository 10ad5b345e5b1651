// Report types handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AnalysisError;
use crate::frequency::{FrequencyProfile, WordCloud};
use crate::sentiment::{PolarityHistogram, SentimentSummary};
use crate::topics::TopicSummary;

/// Result slot for one analysis: either a value or a user-facing reason it
/// is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> Outcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Ready(_) => None,
            Outcome::Unavailable { reason } => Some(reason),
        }
    }
}

impl<T> From<Result<T, AnalysisError>> for Outcome<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(value) => Outcome::Ready(value),
            Err(e) => Outcome::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub summary: SentimentSummary,
    pub histogram: PolarityHistogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyReport {
    pub profile: FrequencyProfile,
    /// Unavailable when the document is too short for a cloud
    pub word_cloud: Outcome<WordCloud>,
}

/// Everything produced for a document that yielded text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Hash of the input bytes
    pub content_key: String,
    pub page_count: usize,
    pub pages_with_text: usize,
    pub token_count: usize,
    pub sentiment: Outcome<SentimentReport>,
    pub frequency: Outcome<FrequencyReport>,
    pub topics: Outcome<TopicSummary>,
}

/// Top-level outcome of analyzing one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Complete(AnalysisReport),
    /// Extraction failed or produced no text; no analysis ran
    NoText { source: String, reason: String },
}

impl Report {
    pub fn analysis(&self) -> Option<&AnalysisReport> {
        match self {
            Report::Complete(report) => Some(report),
            Report::NoText { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let ok: Outcome<u32> = Ok(3).into();
        assert_eq!(ok.ready(), Some(&3));
        assert!(ok.reason().is_none());

        let err: Outcome<u32> = Err(AnalysisError::Modeling("empty vocabulary".into())).into();
        assert!(!err.is_ready());
        assert_eq!(
            err.reason(),
            Some("could not build topic model: empty vocabulary")
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let ok: Outcome<u32> = Outcome::Ready(7);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["result"], 7);

        let missing: Outcome<u32> = Outcome::Unavailable {
            reason: "too short".into(),
        };
        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["result"]["reason"], "too short");
    }

    #[test]
    fn test_no_text_report_serializes() {
        let report = Report::NoText {
            source: "empty.pdf".into(),
            reason: "no text could be extracted from the PDF".into(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "no_text");
        assert_eq!(json["source"], "empty.pdf");
        assert!(report.analysis().is_none());
    }
}
