// Normalizer: raw text -> lowercase, punctuation-free, stopword-free tokens.
//
// The step order matters and is fixed:
//   1. lowercase
//   2. strip everything that is not a word character or whitespace
//   3. strip digit runs
//   4. collapse whitespace and trim
//   5. split on whitespace
//   6. drop English stopwords (NLTK list)
//
// Punctuation goes before digits so "3.5%" collapses to nothing instead of
// leaving a stray "." behind, and contractions fuse ("don't" -> "dont").

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Fused forms whose parts are all stopwords ("cannot" is "can" + "not").
/// Informal fusions like "gonna" or "wanna" have non-stopword parts and stay
/// as single tokens.
const FUSED_STOPWORDS: [&str; 1] = ["cannot"];

/// English stopwords, loaded once per process.
static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    get(LANGUAGE::English)
        .into_iter()
        .chain(FUSED_STOPWORDS.iter().map(|w| w.to_string()))
        .collect()
});

/// The normalized form of a document.
///
/// Invariant: every token is lowercase and contains no punctuation, digits,
/// or whitespace, and no token is a stopword.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenSet {
    tokens: Vec<String>,
    joined: String,
}

impl TokenSet {
    /// Tokens in document order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens rejoined with single spaces (word cloud input).
    pub fn joined(&self) -> &str {
        &self.joined
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// Whether `word` is in the English stopword set.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Normalize raw text into a [`TokenSet`].
///
/// Empty or all-noise input yields an empty set, never an error.
pub fn normalize(text: &str) -> TokenSet {
    if text.is_empty() {
        return TokenSet::default();
    }

    let lowered = text.to_lowercase();
    let no_punct = NON_WORD.replace_all(&lowered, "");
    let no_digits = DIGITS.replace_all(&no_punct, "");
    let collapsed = WHITESPACE.replace_all(&no_digits, " ");

    let tokens: Vec<String> = collapsed
        .trim()
        .split(' ')
        .filter(|word| !word.is_empty() && !is_stopword(word))
        .map(str::to_string)
        .collect();

    debug!(
        input_chars = text.len(),
        tokens = tokens.len(),
        "Normalized text"
    );

    let joined = tokens.join(" ");
    TokenSet { tokens, joined }
}
