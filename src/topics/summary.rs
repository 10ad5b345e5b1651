// Topic model output types and the validated topic count.

use serde::Serialize;

use crate::error::{AnalysisError, Result};

pub const MIN_TOPICS: usize = 2;
pub const MAX_TOPICS: usize = 15;
pub const DEFAULT_TOPICS: usize = 10;

/// Number of topics to fit, guaranteed to lie in `MIN_TOPICS..=MAX_TOPICS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopicCount(usize);

impl TopicCount {
    pub fn new(k: usize) -> Result<Self> {
        if (MIN_TOPICS..=MAX_TOPICS).contains(&k) {
            Ok(Self(k))
        } else {
            Err(AnalysisError::InvalidTopicCount(k))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopicCount {
    fn default() -> Self {
        Self(DEFAULT_TOPICS)
    }
}

impl TryFrom<usize> for TopicCount {
    type Error = AnalysisError;

    fn try_from(k: usize) -> Result<Self> {
        Self::new(k)
    }
}

impl std::fmt::Display for TopicCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inferred topic: its index and top terms, highest weight first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub index: usize,
    pub terms: Vec<(String, f64)>,
}

impl Topic {
    /// Weighted-sum rendering, e.g. `0.045*"steel" + 0.031*"growth"`.
    pub fn formatted(&self) -> String {
        self.terms
            .iter()
            .map(|(term, weight)| format!("{weight:.3}*\"{term}\""))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// All topics of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    pub num_topics: TopicCount,
    pub vocabulary_size: usize,
    pub topics: Vec<Topic>,
}
