// Topic modeler: state machine + per-(tokens, k) cache around an extractor.
//
//   Uninitialized -> Fitting -> Ready | Failed
//
// A request for the (tokens, k) pair the model is already Ready for returns
// the current result without refitting. Any other pair goes back through
// Fitting; if that exact pair was fitted before, the cached result is reused
// since fitting is deterministic.

use std::sync::Arc;

use tracing::{info, warn};

use super::summary::{TopicCount, TopicSummary};
use super::traits::TopicExtractor;
use crate::cache::{ContentKey, KeyBuilder, MemoCache};
use crate::error::Result;

/// Lifecycle of the modeler's current model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Uninitialized,
    Fitting,
    Ready,
    /// Last fit failed; holds the reason shown to the user
    Failed(String),
}

pub struct TopicModeler {
    extractor: Box<dyn TopicExtractor + Send>,
    state: ModelState,
    current: Option<(ContentKey, Arc<TopicSummary>)>,
    cache: MemoCache<TopicSummary>,
    fits: usize,
}

impl TopicModeler {
    pub fn new(extractor: Box<dyn TopicExtractor + Send>) -> Self {
        Self {
            extractor,
            state: ModelState::Uninitialized,
            current: None,
            cache: MemoCache::new("topics"),
            fits: 0,
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// How many times the underlying extractor actually ran.
    pub fn fit_count(&self) -> usize {
        self.fits
    }

    /// The result for the Ready state, if any.
    pub fn current(&self) -> Option<Arc<TopicSummary>> {
        match self.state {
            ModelState::Ready => self.current.as_ref().map(|(_, s)| Arc::clone(s)),
            _ => None,
        }
    }

    /// Model `tokens` with `num_topics` topics.
    pub fn model(&mut self, tokens: &[String], num_topics: TopicCount) -> Result<Arc<TopicSummary>> {
        let key = KeyBuilder::new("topics")
            .tokens(tokens)
            .param(num_topics.get() as u64)
            .finish();

        if self.state == ModelState::Ready {
            if let Some((current_key, summary)) = &self.current {
                if *current_key == key {
                    return Ok(Arc::clone(summary));
                }
            }
        }

        self.state = ModelState::Fitting;
        info!(num_topics = num_topics.get(), tokens = tokens.len(), key = %key, "Building topic model");

        let extractor = &self.extractor;
        let fits = &mut self.fits;
        let result = self.cache.get_or_try_insert(key.clone(), || {
            *fits += 1;
            extractor.extract(tokens, num_topics)
        });

        match result {
            Ok(summary) => {
                self.state = ModelState::Ready;
                self.current = Some((key, Arc::clone(&summary)));
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, num_topics = num_topics.get(), "Topic modeling failed");
                self.state = ModelState::Failed(e.to_string());
                self.current = None;
                Err(e)
            }
        }
    }
}
