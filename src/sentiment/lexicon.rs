// Lexicon-based polarity scoring.
//
// Each sentiment-bearing word carries a prior polarity in [-1, 1]. Within a
// sentence:
//   - an intensifier ("very", "extremely") scales the next sentiment word
//   - a negator ("not", "never", "isn't") within the three preceding words
//     flips and dampens it (x -0.5), so "not good" is mildly negative rather
//     than as negative as "bad"
//   - the sentence score is the mean over scored words, clamped to [-1, 1]
// A sentence with no sentiment words scores exactly 0.0 (neutral).

use std::collections::HashMap;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

/// Trait for scoring a single sentence's polarity.
///
/// Implementations must be deterministic and return a value in [-1, 1].
pub trait PolarityScorer {
    fn polarity(&self, sentence: &str) -> f64;
}

/// How far back (in words) a negator still applies.
const NEGATION_WINDOW: usize = 3;
/// Negated words are flipped and dampened by this factor.
const NEGATION_FACTOR: f64 = -0.5;

static LEXICON: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY_WORDS.iter().copied().collect());

static INTENSIFIERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIER_WORDS.iter().copied().collect());

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nobody", "nothing", "nowhere", "cannot",
    "without", "hardly", "barely",
];

/// Default scorer backed by the embedded polarity lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, sentence: &str) -> f64 {
        let words: Vec<String> = sentence
            .unicode_words()
            .map(|w| w.to_lowercase().replace('\u{2019}', "'"))
            .collect();

        let mut scores: Vec<f64> = Vec::new();
        let mut pending_intensity: Option<f64> = None;
        let mut last_negator: Option<usize> = None;

        for (i, word) in words.iter().enumerate() {
            if is_negator(word) {
                last_negator = Some(i);
                continue;
            }

            if let Some(&factor) = INTENSIFIERS.get(word.as_str()) {
                pending_intensity = Some(pending_intensity.unwrap_or(1.0) * factor);
                continue;
            }

            let Some(&prior) = LEXICON.get(word.as_str()) else {
                // Intensifiers only reach the word right after them
                pending_intensity = None;
                continue;
            };

            let mut score = prior * pending_intensity.take().unwrap_or(1.0);
            if last_negator.is_some_and(|n| i - n <= NEGATION_WINDOW) {
                score *= NEGATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

const INTENSIFIER_WORDS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("exceptionally", 1.5),
    ("highly", 1.3),
    ("hugely", 1.4),
    ("incredibly", 1.4),
    ("particularly", 1.2),
    ("remarkably", 1.3),
    ("significantly", 1.3),
    ("substantially", 1.3),
    ("truly", 1.2),
    ("quite", 1.1),
    ("most", 1.2),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
    ("fairly", 0.8),
    ("relatively", 0.8),
];

const POLARITY_WORDS: &[(&str, f64)] = &[
    // strongly positive
    ("excellent", 1.0),
    ("outstanding", 0.9),
    ("exceptional", 0.9),
    ("superb", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("wonderful", 1.0),
    ("amazing", 0.8),
    ("fantastic", 0.8),
    ("brilliant", 0.9),
    ("remarkable", 0.75),
    ("record", 0.4),
    ("delighted", 0.8),
    ("proud", 0.8),
    ("great", 0.8),
    ("happy", 0.8),
    ("successful", 0.75),
    ("success", 0.6),
    ("successfully", 0.75),
    ("impressive", 0.75),
    ("love", 0.5),
    // moderately positive
    ("good", 0.7),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("strongest", 0.6),
    ("robust", 0.5),
    ("healthy", 0.5),
    ("resilient", 0.5),
    ("better", 0.5),
    ("improved", 0.5),
    ("improve", 0.4),
    ("improvement", 0.4),
    ("improving", 0.4),
    ("positive", 0.23),
    ("favourable", 0.5),
    ("favorable", 0.5),
    ("beneficial", 0.5),
    ("benefit", 0.3),
    ("efficient", 0.4),
    ("effective", 0.6),
    ("sustainable", 0.3),
    ("stable", 0.3),
    ("steady", 0.2),
    ("growth", 0.2),
    ("gain", 0.3),
    ("gains", 0.3),
    ("profitable", 0.5),
    ("profit", 0.2),
    ("progress", 0.3),
    ("opportunity", 0.3),
    ("opportunities", 0.3),
    ("innovative", 0.5),
    ("leading", 0.3),
    ("significant", 0.38),
    ("valuable", 0.4),
    ("confident", 0.5),
    ("optimistic", 0.5),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("safe", 0.5),
    ("secure", 0.4),
    ("reliable", 0.5),
    ("achieve", 0.3),
    ("achieved", 0.3),
    ("achievement", 0.4),
    ("win", 0.8),
    ("won", 0.5),
    ("easy", 0.43),
    ("nice", 0.6),
    ("fine", 0.42),
    ("clean", 0.37),
    ("fair", 0.7),
    ("glad", 0.5),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("right", 0.29),
    ("correct", 0.3),
    ("well", 0.2),
    ("higher", 0.25),
    ("high", 0.16),
    ("new", 0.14),
    ("important", 0.4),
    ("excited", 0.38),
    ("exciting", 0.3),
    ("welcome", 0.8),
    ("thank", 0.2),
    ("thanks", 0.2),
    // mildly negative
    ("low", -0.1),
    ("lower", -0.1),
    ("slow", -0.3),
    ("slowdown", -0.4),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("weakness", -0.4),
    ("decline", -0.3),
    ("declined", -0.3),
    ("declining", -0.3),
    ("decrease", -0.2),
    ("decreased", -0.2),
    ("drop", -0.3),
    ("fell", -0.3),
    ("fall", -0.2),
    ("uncertain", -0.3),
    ("uncertainty", -0.3),
    ("volatile", -0.4),
    ("volatility", -0.3),
    ("challenging", -0.3),
    ("challenge", -0.2),
    ("challenges", -0.2),
    ("difficult", -0.5),
    ("difficulty", -0.4),
    ("hard", -0.29),
    ("pressure", -0.2),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("risk", -0.2),
    ("risks", -0.2),
    ("risky", -0.5),
    ("adverse", -0.5),
    ("negative", -0.3),
    ("wrong", -0.5),
    ("problem", -0.4),
    ("problems", -0.4),
    ("issue", -0.1),
    ("delay", -0.3),
    ("delayed", -0.3),
    ("lack", -0.3),
    ("limited", -0.07),
    ("shortage", -0.4),
    ("unfortunately", -0.5),
    ("sad", -0.5),
    ("worry", -0.4),
    ("worried", -0.5),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    // strongly negative
    ("bad", -0.7),
    ("poor", -0.4),
    ("poorly", -0.4),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("severe", -0.6),
    ("serious", -0.33),
    ("crisis", -0.6),
    ("loss", -0.4),
    ("losses", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.6),
    ("fatal", -0.8),
    ("fatality", -0.8),
    ("fatalities", -0.8),
    ("accident", -0.5),
    ("accidents", -0.5),
    ("injury", -0.5),
    ("injuries", -0.5),
    ("damage", -0.5),
    ("damaged", -0.5),
    ("harmful", -0.6),
    ("dangerous", -0.6),
    ("impairment", -0.5),
    ("default", -0.4),
    ("fraud", -0.8),
    ("angry", -0.5),
    ("hate", -0.8),
    ("disaster", -0.8),
    ("collapse", -0.7),
    ("weakest", -0.6),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn score(s: &str) -> f64 {
        LexiconScorer.polarity(s)
    }

    #[test]
    fn test_neutral_without_sentiment_words() {
        assert_eq!(score("The meeting was held on Tuesday in Mumbai."), 0.0);
        assert_eq!(score(""), 0.0);
    }

    #[test]
    fn test_single_word_polarity() {
        assert!((score("This is good.") - 0.7).abs() < 1e-9);
        assert!((score("This is bad.") + 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_mean_over_scored_words() {
        // (0.7 + -0.7) / 2
        assert!(score("Good results, bad timing.").abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales_next_word() {
        // 0.7 * 1.3 = 0.91
        assert!((score("A very good year.") - 0.91).abs() < 1e-9);
        // Intensity does not leak past a non-sentiment word
        assert!((score("Very much a good year.") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_intensified_score_is_clamped() {
        assert!((score("An extremely excellent outcome.") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        // 0.7 * -0.5 = -0.35
        assert!((score("The quarter was not good.") + 0.35).abs() < 1e-9);
        assert!((score("It wasn't bad at all.") - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_negation_window_expires() {
        // "not" sits seven words before "good", outside the window
        assert!((score("Not one of the four plants reported good numbers.") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let samples = [
            "Excellent excellent excellent!",
            "Terrible, awful, horrible and the worst.",
            "Not very bad, not very good.",
            "Extremely very really highly incredibly great.",
        ];
        for s in samples {
            let p = score(s);
            assert!((-1.0..=1.0).contains(&p), "{s} -> {p}");
        }
    }
}
