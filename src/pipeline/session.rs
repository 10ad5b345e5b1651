// Analysis session: owns the stage implementations and their caches.
//
// Flow per input:
//   bytes -> Document (cached by content)
//         -> TokenSet (cached by text)
//         -> sentiment | frequency | topics, each isolated in its own Outcome
//
// A new document supersedes the previous one. `retopic` re-runs only the
// topic stage against the current document's tokens.

use std::convert::Infallible;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::document::Document;
use super::report::{AnalysisReport, FrequencyReport, Outcome, Report, SentimentReport};
use crate::cache::{ContentKey, KeyBuilder, MemoCache};
use crate::error::{AnalysisError, Result};
use crate::extract::{LopdfExtractor, TextExtractor};
use crate::frequency;
use crate::sentiment::{score_sentences, LexiconScorer, PolarityScorer, DEFAULT_HISTOGRAM_BINS};
use crate::text::{normalize, TokenSet};
use crate::topics::lda::LdaConfig;
use crate::topics::traits::LdaExtractor;
use crate::topics::{ModelState, TopicCount, TopicExtractor, TopicModeler, TopicSummary};

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub lda: LdaConfig,
    /// Number of bins in the polarity histogram
    pub histogram_bins: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            lda: LdaConfig::default(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

pub struct AnalysisSession {
    extractor: Box<dyn TextExtractor + Send>,
    scorer: Box<dyn PolarityScorer + Send>,
    modeler: TopicModeler,
    documents: MemoCache<Document>,
    token_sets: MemoCache<TokenSet>,
    current: Option<(Arc<Document>, Arc<TokenSet>)>,
    histogram_bins: usize,
}

impl AnalysisSession {
    /// Session with the default lopdf extractor, lexicon scorer and LDA.
    pub fn new(settings: AnalysisSettings) -> Self {
        Self::with_components(
            Box::new(LopdfExtractor),
            Box::new(LexiconScorer),
            Box::new(LdaExtractor::new(settings.lda)),
            settings.histogram_bins,
        )
    }

    pub fn with_components(
        extractor: Box<dyn TextExtractor + Send>,
        scorer: Box<dyn PolarityScorer + Send>,
        topics: Box<dyn TopicExtractor + Send>,
        histogram_bins: usize,
    ) -> Self {
        Self {
            extractor,
            scorer,
            modeler: TopicModeler::new(topics),
            documents: MemoCache::new("documents"),
            token_sets: MemoCache::new("tokens"),
            current: None,
            histogram_bins,
        }
    }

    /// Extract a document from raw PDF bytes, reusing a cached extraction of
    /// identical bytes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<Arc<Document>> {
        let key = ContentKey::of_bytes(bytes);
        let extractor = &self.extractor;
        self.documents.get_or_try_insert(key.clone(), || {
            let extracted = extractor.extract(bytes)?;
            Ok(Document::from_extracted(key, extracted))
        })
    }

    /// Normalize a document's text, reusing a cached token set.
    pub fn tokenize(&mut self, document: &Document) -> Arc<TokenSet> {
        let key = KeyBuilder::new("normalize")
            .bytes(document.original_text.as_bytes())
            .finish();
        let result = self
            .token_sets
            .get_or_try_insert(key, || Ok::<_, Infallible>(normalize(&document.original_text)));
        match result {
            Ok(tokens) => tokens,
            Err(never) => match never {},
        }
    }

    /// Run every analysis over `bytes`.
    ///
    /// Extraction failure or empty text yields [`Report::NoText`] and runs
    /// nothing else. Otherwise each analysis lands in its own [`Outcome`].
    pub fn analyze(&mut self, source: &str, bytes: &[u8], num_topics: TopicCount) -> Report {
        info!(source, bytes = bytes.len(), num_topics = num_topics.get(), "Starting analysis");

        let document = match self.load(bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!(source, error = %e, "No text extracted");
                self.current = None;
                return Report::NoText {
                    source: source.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let tokens = self.tokenize(&document);
        self.current = Some((Arc::clone(&document), Arc::clone(&tokens)));

        let sentiment = Outcome::Ready(self.sentiment(&document));
        let frequency = Outcome::Ready(self.frequency(&tokens));
        let topics: Outcome<TopicSummary> = self
            .modeler
            .model(tokens.tokens(), num_topics)
            .map(|summary| (*summary).clone())
            .into();

        info!(
            source,
            sentences = document.sentences.len(),
            tokens = tokens.len(),
            topics_ready = topics.is_ready(),
            "Analysis complete"
        );

        Report::Complete(AnalysisReport {
            source: source.to_string(),
            generated_at: Utc::now(),
            content_key: document.key.as_str().to_string(),
            page_count: document.page_count,
            pages_with_text: document.pages_with_text,
            token_count: tokens.len(),
            sentiment,
            frequency,
            topics,
        })
    }

    /// Refit topics for the current document with a different topic count.
    pub fn retopic(&mut self, num_topics: TopicCount) -> Result<Arc<TopicSummary>> {
        let (_, tokens) = self.current.as_ref().ok_or_else(|| {
            AnalysisError::Modeling("no document has been analyzed yet".into())
        })?;
        let tokens = Arc::clone(tokens);
        self.modeler.model(tokens.tokens(), num_topics)
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.current.as_ref().map(|(document, _)| document.as_ref())
    }

    pub fn current_tokens(&self) -> Option<&TokenSet> {
        self.current.as_ref().map(|(_, tokens)| tokens.as_ref())
    }

    pub fn topic_state(&self) -> &ModelState {
        self.modeler.state()
    }

    /// How many times a topic model was actually fitted.
    pub fn topic_fits(&self) -> usize {
        self.modeler.fit_count()
    }

    fn sentiment(&self, document: &Document) -> SentimentReport {
        let summary = score_sentences(&document.sentences, self.scorer.as_ref());
        let histogram = summary.histogram(self.histogram_bins);
        SentimentReport { summary, histogram }
    }

    fn frequency(&self, tokens: &TokenSet) -> FrequencyReport {
        let profile = frequency::profile(tokens.tokens(), tokens.joined());
        let word_cloud = profile.word_cloud().into();
        FrequencyReport { profile, word_cloud }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedText;

    /// Returns fixed text regardless of input; empty input fails like a bad PDF.
    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
            if bytes.is_empty() {
                return Err(AnalysisError::Extraction("empty input".into()));
            }
            if self.0.trim().is_empty() {
                return Err(AnalysisError::EmptyText);
            }
            Ok(ExtractedText {
                text: self.0.to_string(),
                pages_with_text: 1,
                page_count: 1,
            })
        }
    }

    fn session(text: &'static str) -> AnalysisSession {
        AnalysisSession::with_components(
            Box::new(FixedText(text)),
            Box::new(LexiconScorer),
            Box::new(LdaExtractor::default()),
            DEFAULT_HISTOGRAM_BINS,
        )
    }

    const REPORT: &str = "Steel demand grew strongly this year. \
        Profit margins were excellent across Europe. \
        Coal prices caused a terrible loss in the quarter.";

    #[test]
    fn test_empty_text_short_circuits() {
        let mut s = session("   ");
        let report = s.analyze("blank.pdf", b"%PDF", TopicCount::default());
        match report {
            Report::NoText { source, reason } => {
                assert_eq!(source, "blank.pdf");
                assert_eq!(reason, "no text could be extracted from the PDF");
            }
            other => panic!("expected NoText, got {other:?}"),
        }
        assert_eq!(s.topic_fits(), 0);
        assert!(s.current_document().is_none());
    }

    #[test]
    fn test_complete_report() {
        let mut s = session(REPORT);
        let report = s.analyze("report.pdf", b"bytes", TopicCount::new(2).unwrap());
        let analysis = report.analysis().expect("complete report");

        let sentiment = analysis.sentiment.ready().unwrap();
        assert_eq!(sentiment.summary.sentence_count(), 3);
        assert_eq!(sentiment.histogram.total(), 3);

        let frequency = analysis.frequency.ready().unwrap();
        assert_eq!(frequency.profile.total_tokens, analysis.token_count);
        assert!(frequency.word_cloud.is_ready());

        let topics = analysis.topics.ready().unwrap();
        assert_eq!(topics.topics.len(), 2);
        assert_eq!(*s.topic_state(), ModelState::Ready);
    }

    #[test]
    fn test_same_bytes_reuse_extraction() {
        let mut s = session(REPORT);
        let k = TopicCount::new(3).unwrap();
        s.analyze("a.pdf", b"same", k);
        s.analyze("b.pdf", b"same", k);
        assert_eq!(s.documents.len(), 1);
        assert_eq!(s.token_sets.len(), 1);
        assert_eq!(s.topic_fits(), 1);
    }

    #[test]
    fn test_retopic_uses_current_tokens() {
        let mut s = session(REPORT);
        s.analyze("report.pdf", b"bytes", TopicCount::new(2).unwrap());
        let five = s.retopic(TopicCount::new(5).unwrap()).unwrap();
        assert_eq!(five.topics.len(), 5);
        assert_eq!(s.topic_fits(), 2);
    }

    #[test]
    fn test_retopic_without_document_fails() {
        let mut s = session(REPORT);
        assert!(matches!(
            s.retopic(TopicCount::default()),
            Err(AnalysisError::Modeling(_))
        ));
    }

    #[test]
    fn test_topic_failure_is_isolated() {
        // Only stopwords: text exists but no tokens survive normalization
        let mut s = session("It was what they had.");
        let report = s.analyze("stop.pdf", b"bytes", TopicCount::default());
        let analysis = report.analysis().unwrap();

        assert!(analysis.sentiment.is_ready());
        assert!(analysis.frequency.is_ready());
        assert!(!analysis.topics.is_ready());
        assert!(analysis
            .topics
            .reason()
            .unwrap()
            .starts_with("could not build topic model"));
        assert!(matches!(s.topic_state(), ModelState::Failed(_)));
    }
}
