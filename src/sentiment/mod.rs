// Sentence sentiment: segmentation, lexicon scoring, and aggregation.
//
// Runs on the original extracted text, not the normalized tokens:
// punctuation drives sentence boundaries and negation words are stopwords.

pub mod analyzer;
pub mod lexicon;
pub mod segment;

pub use analyzer::{
    analyze_sentiment, score_sentences, PolarityBand, PolarityHistogram, SentimentRecord,
    SentimentSummary, DEFAULT_HISTOGRAM_BINS,
};
pub use lexicon::{LexiconScorer, PolarityScorer};
pub use segment::split_sentences;
