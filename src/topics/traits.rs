// Topic extractor trait with an LDA default.
//
// The modeler only needs "tokens + topic count in, ranked topics out". The
// default implementation fits LDA over a single bag-of-words document; a
// different model (NMF, embeddings clustering) could be swapped in behind
// the same interface.

use tracing::info;

use super::dictionary::Dictionary;
use super::lda::{LdaConfig, LdaModel};
use super::summary::{Topic, TopicCount, TopicSummary};
use crate::error::{AnalysisError, Result};

/// Number of terms reported per topic.
pub const TERMS_PER_TOPIC: usize = 10;

/// Trait for extracting ranked topics from a token sequence.
pub trait TopicExtractor {
    /// Fit a model with `num_topics` topics and report each topic's top terms.
    fn extract(&self, tokens: &[String], num_topics: TopicCount) -> Result<TopicSummary>;
}

/// LDA-based extractor, the default.
///
/// The whole document is treated as a one-entry corpus. This limits how
/// well topics separate (LDA expects many documents) but is the intended
/// behavior for single-report analysis.
#[derive(Debug, Clone)]
pub struct LdaExtractor {
    pub config: LdaConfig,
    /// How many terms to report per topic
    pub terms_per_topic: usize,
}

impl Default for LdaExtractor {
    fn default() -> Self {
        Self {
            config: LdaConfig::default(),
            terms_per_topic: TERMS_PER_TOPIC,
        }
    }
}

impl LdaExtractor {
    pub fn new(config: LdaConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl TopicExtractor for LdaExtractor {
    fn extract(&self, tokens: &[String], num_topics: TopicCount) -> Result<TopicSummary> {
        if tokens.is_empty() {
            return Err(AnalysisError::Modeling(
                "no tokens to model, document may be empty after filtering".into(),
            ));
        }

        let dictionary = Dictionary::from_documents(&[tokens]);
        let corpus = vec![dictionary.doc2bow(tokens)];

        let model = LdaModel::fit(&corpus, dictionary.len(), num_topics.get(), &self.config)?;

        let mut topics = Vec::with_capacity(num_topics.get());
        for index in 0..model.num_topics() {
            let terms = model
                .top_terms(index, self.terms_per_topic)
                .into_iter()
                .map(|(id, weight)| {
                    let term = dictionary.token(id).ok_or_else(|| {
                        AnalysisError::Modeling(format!("term id {id} missing from dictionary"))
                    })?;
                    Ok((term.to_string(), weight))
                })
                .collect::<Result<Vec<_>>>()?;
            topics.push(Topic { index, terms });
        }

        info!(
            num_topics = num_topics.get(),
            vocabulary = dictionary.len(),
            passes = self.config.passes,
            seed = self.config.random_state,
            "Fitted LDA topic model"
        );

        Ok(TopicSummary {
            num_topics,
            vocabulary_size: dictionary.len(),
            topics,
        })
    }
}
