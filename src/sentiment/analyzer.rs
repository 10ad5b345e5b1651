// Sentence-level sentiment: per-sentence records, band counts, histogram.

use serde::Serialize;
use tracing::info;

use super::lexicon::PolarityScorer;
use super::segment::split_sentences;

/// Polarity above this is positive, below its negation is negative.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Default number of histogram buckets over [-1, 1].
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Sentiment band of a single sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarityBand {
    Positive,
    Neutral,
    Negative,
}

impl PolarityBand {
    /// Classify a polarity: `> 0.05` positive, `< -0.05` negative, else neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > NEUTRAL_BAND {
            PolarityBand::Positive
        } else if polarity < -NEUTRAL_BAND {
            PolarityBand::Negative
        } else {
            PolarityBand::Neutral
        }
    }
}

impl std::fmt::Display for PolarityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolarityBand::Positive => write!(f, "Positive"),
            PolarityBand::Neutral => write!(f, "Neutral"),
            PolarityBand::Negative => write!(f, "Negative"),
        }
    }
}

/// One scored sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub text: String,
    /// Polarity in [-1, 1]
    pub polarity: f64,
    pub band: PolarityBand,
}

impl SentimentRecord {
    pub fn new(text: String, polarity: f64) -> Self {
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            text,
            polarity,
            band: PolarityBand::from_polarity(polarity),
        }
    }
}

/// Sentiment over a whole document.
///
/// Invariant: `positive + neutral + negative == records.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub records: Vec<SentimentRecord>,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentSummary {
    pub fn from_records(records: Vec<SentimentRecord>) -> Self {
        let mut positive = 0;
        let mut neutral = 0;
        let mut negative = 0;
        for record in &records {
            match record.band {
                PolarityBand::Positive => positive += 1,
                PolarityBand::Neutral => neutral += 1,
                PolarityBand::Negative => negative += 1,
            }
        }
        Self {
            records,
            positive,
            neutral,
            negative,
        }
    }

    pub fn sentence_count(&self) -> usize {
        self.records.len()
    }

    /// Polarity of every sentence, in document order.
    pub fn polarities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.polarity).collect()
    }

    /// Mean polarity across sentences (0.0 for an empty document).
    pub fn mean_polarity(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.polarity).sum::<f64>() / self.records.len() as f64
    }

    /// Fixed-width histogram of polarities over [-1, 1].
    pub fn histogram(&self, bins: usize) -> PolarityHistogram {
        PolarityHistogram::from_polarities(self.records.iter().map(|r| r.polarity), bins)
    }

    /// The `n` most extreme sentences of the given band, strongest first.
    /// Neutral sentences are ranked by closeness to zero.
    pub fn strongest(&self, band: PolarityBand, n: usize) -> Vec<&SentimentRecord> {
        let mut matching: Vec<&SentimentRecord> =
            self.records.iter().filter(|r| r.band == band).collect();
        match band {
            PolarityBand::Positive => matching.sort_by(|a, b| b.polarity.total_cmp(&a.polarity)),
            PolarityBand::Negative => matching.sort_by(|a, b| a.polarity.total_cmp(&b.polarity)),
            PolarityBand::Neutral => {
                matching.sort_by(|a, b| a.polarity.abs().total_cmp(&b.polarity.abs()))
            }
        }
        matching.truncate(n);
        matching
    }
}

/// Counts of polarities in equal-width buckets spanning [-1, 1].
///
/// The last bucket is closed on the right so a polarity of exactly 1.0 is
/// counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarityHistogram {
    pub counts: Vec<usize>,
}

impl PolarityHistogram {
    pub fn from_polarities(polarities: impl IntoIterator<Item = f64>, bins: usize) -> Self {
        let mut counts = vec![0usize; bins];
        if bins == 0 {
            return Self { counts };
        }

        let width = 2.0 / bins as f64;
        for p in polarities {
            let p = p.clamp(-1.0, 1.0);
            let idx = (((p + 1.0) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self { counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Lower and upper edge of bucket `idx`.
    pub fn bin_range(&self, idx: usize) -> (f64, f64) {
        let width = 2.0 / self.counts.len().max(1) as f64;
        let lower = -1.0 + idx as f64 * width;
        (lower, lower + width)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Split `text` into sentences and score each one.
pub fn analyze_sentiment(text: &str, scorer: &dyn PolarityScorer) -> SentimentSummary {
    score_sentences(&split_sentences(text), scorer)
}

/// Score already-segmented sentences.
pub fn score_sentences(sentences: &[String], scorer: &dyn PolarityScorer) -> SentimentSummary {
    let records: Vec<SentimentRecord> = sentences
        .iter()
        .map(|sentence| SentimentRecord::new(sentence.clone(), scorer.polarity(sentence)))
        .collect();

    let summary = SentimentSummary::from_records(records);

    info!(
        sentences = summary.sentence_count(),
        positive = summary.positive,
        neutral = summary.neutral,
        negative = summary.negative,
        "Scored sentence sentiment"
    );

    summary
}
