// Word frequency profiling and word cloud input.
//
// Counts are exact multiset counts. Terms are stored in first-seen order so
// that sorting by count with a stable sort breaks ties by first occurrence,
// which keeps the top-N view deterministic.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};

/// How many terms the frequency table view shows.
pub const TOP_TERMS: usize = 20;
/// Maximum number of terms placed in a word cloud.
pub const MAX_CLOUD_TERMS: usize = 200;
/// Fewer distinct terms than this cannot be laid out as a cloud.
pub const MIN_CLOUD_TERMS: usize = 3;

/// Token -> count, remembering first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    /// (term, count) in first-seen order
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut table = Self::default();
        for token in tokens {
            table.add(token);
        }
        table
    }

    fn add(&mut self, token: &str) {
        self.total += 1;
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    pub fn count(&self, term: &str) -> usize {
        self.index
            .get(term)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Sum of all counts (equals the number of tokens counted).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent terms, descending by count, ties in first-seen
    /// order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        // Stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(term, count)| (term.clone(), *count))
            .collect()
    }
}

/// Word cloud input: terms weighted by relative frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloud {
    /// (term, weight) with the most frequent term at weight 1.0, descending
    pub terms: Vec<(String, f64)>,
    /// The normalized document text the cloud is built from
    pub text: String,
}

/// Frequency statistics of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyProfile {
    /// Top terms for tabular display
    pub top_terms: Vec<(String, usize)>,
    pub total_tokens: usize,
    pub distinct_terms: usize,
    /// Normalized tokens joined by single spaces
    pub joined_text: String,
    #[serde(skip)]
    table: FrequencyTable,
}

impl FrequencyProfile {
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Build the word cloud input.
    ///
    /// Fails with `InsufficientData` when there are too few distinct terms to
    /// lay out; the frequency table itself is still valid in that case.
    pub fn word_cloud(&self) -> Result<WordCloud> {
        if self.table.distinct() < MIN_CLOUD_TERMS {
            return Err(AnalysisError::InsufficientData {
                distinct: self.table.distinct(),
                required: MIN_CLOUD_TERMS,
            });
        }

        let ranked = self.table.top(MAX_CLOUD_TERMS);
        let max_count = ranked.first().map(|(_, c)| *c).unwrap_or(1).max(1) as f64;
        let terms: Vec<(String, f64)> = ranked
            .into_iter()
            .map(|(term, count)| (term, count as f64 / max_count))
            .collect();

        debug!(terms = terms.len(), "Built word cloud weights");

        Ok(WordCloud {
            terms,
            text: self.joined_text.clone(),
        })
    }
}

/// Count tokens and build the frequency profile.
///
/// `joined_text` is the normalizer's rejoined string; it is carried through
/// unchanged for the word cloud renderer.
pub fn profile(tokens: &[String], joined_text: &str) -> FrequencyProfile {
    let table = FrequencyTable::from_tokens(tokens);
    let top_terms = table.top(TOP_TERMS);

    info!(
        tokens = table.total(),
        distinct = table.distinct(),
        top_term = top_terms.first().map(|(t, _)| t.as_str()).unwrap_or(""),
        "Profiled word frequencies"
    );

    FrequencyProfile {
        top_terms,
        total_tokens: table.total(),
        distinct_terms: table.distinct(),
        joined_text: joined_text.to_string(),
        table,
    }
}
