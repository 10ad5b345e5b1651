// Colored terminal output for analysis reports.
//
// This module handles all terminal-specific formatting: colors, tables,
// character-drawn charts. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::frequency::WordCloud;
use crate::pipeline::{AnalysisReport, FrequencyReport, Outcome, Report, SentimentReport};
use crate::sentiment::{PolarityBand, PolarityHistogram};
use crate::topics::TopicSummary;

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 40;
/// Example sentences shown per band.
const EXAMPLES_PER_BAND: usize = 3;
/// Word cloud terms listed in the terminal.
const CLOUD_PREVIEW: usize = 30;

/// Display a full report.
pub fn display_report(report: &Report) {
    match report {
        Report::NoText { source, reason } => {
            println!("\n{}", format!("=== {source} ===").bold());
            println!("  {} No text extracted: {}", "!".red().bold(), reason);
        }
        Report::Complete(analysis) => display_analysis(analysis),
    }
}

fn display_analysis(report: &AnalysisReport) {
    println!("\n{}", format!("=== {} ===", report.source).bold());
    println!(
        "  Pages with text: {}/{}  Tokens: {}  Key: {}",
        report.pages_with_text,
        report.page_count,
        report.token_count,
        super::truncate_chars(&report.content_key, 12).dimmed()
    );

    match &report.sentiment {
        Outcome::Ready(sentiment) => display_sentiment(sentiment),
        Outcome::Unavailable { reason } => display_unavailable("Sentiment", reason),
    }
    match &report.frequency {
        Outcome::Ready(frequency) => display_frequency(frequency),
        Outcome::Unavailable { reason } => display_unavailable("Word Frequency", reason),
    }
    match &report.topics {
        Outcome::Ready(topics) => display_topics(topics),
        Outcome::Unavailable { reason } => display_unavailable("Topics", reason),
    }
    println!();
}

/// Display the sentiment counts, polarity histogram and example sentences.
pub fn display_sentiment(report: &SentimentReport) {
    let summary = &report.summary;
    println!(
        "\n{}",
        format!("=== Sentiment ({} sentences) ===", summary.sentence_count()).bold()
    );
    println!(
        "  {} {}   {} {}   {} {}   mean {:+.3}",
        colorize_band(PolarityBand::Positive),
        summary.positive,
        colorize_band(PolarityBand::Neutral),
        summary.neutral,
        colorize_band(PolarityBand::Negative),
        summary.negative,
        summary.mean_polarity(),
    );

    display_histogram(&report.histogram);

    for band in [PolarityBand::Positive, PolarityBand::Negative] {
        let examples = summary.strongest(band, EXAMPLES_PER_BAND);
        if examples.is_empty() {
            continue;
        }
        println!("\n  Most {} sentences:", colorize_band(band));
        for record in examples {
            let preview = super::truncate_chars(&record.text, 120);
            println!("    [{:+.2}] {}", record.polarity, preview.dimmed());
        }
    }
}

/// Draw the polarity histogram as horizontal bars, skipping empty bins.
pub fn display_histogram(histogram: &PolarityHistogram) {
    let max = histogram.counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        println!("  (no sentences)");
        return;
    }

    println!("\n  Polarity distribution:");
    for (idx, &count) in histogram.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let (lo, hi) = histogram.bin_range(idx);
        let width = (count * BAR_WIDTH).div_ceil(max);
        let bar = "#".repeat(width);
        let midpoint = (lo + hi) / 2.0;
        let bar = match PolarityBand::from_polarity(midpoint) {
            PolarityBand::Positive => bar.green(),
            PolarityBand::Neutral => bar.normal(),
            PolarityBand::Negative => bar.red(),
        };
        println!("    {:+.2}..{:+.2} {:>5} {}", lo, hi, count, bar);
    }
}

/// Display the top-terms table and word cloud preview.
pub fn display_frequency(report: &FrequencyReport) {
    let profile = &report.profile;
    println!(
        "\n{}",
        format!(
            "=== Word Frequency ({} tokens, {} distinct) ===",
            profile.total_tokens, profile.distinct_terms
        )
        .bold()
    );

    if profile.top_terms.is_empty() {
        println!("  No words left after filtering.");
    } else {
        println!("  {:>4}  {:<24} {:>7}", "Rank".dimmed(), "Word".dimmed(), "Count".dimmed());
        println!("  {}", "-".repeat(38).dimmed());
        for (i, (word, count)) in profile.top_terms.iter().enumerate() {
            println!("  {:>4}. {:<24} {:>7}", i + 1, word, count);
        }
    }

    match &report.word_cloud {
        Outcome::Ready(cloud) => display_word_cloud(cloud),
        Outcome::Unavailable { reason } => display_unavailable("Word Cloud", reason),
    }
}

fn display_word_cloud(cloud: &WordCloud) {
    println!("\n  Word cloud ({} terms):", cloud.terms.len());
    let line = cloud
        .terms
        .iter()
        .take(CLOUD_PREVIEW)
        .map(|(term, weight)| {
            if *weight >= 0.66 {
                term.bold().to_string()
            } else if *weight >= 0.33 {
                term.normal().to_string()
            } else {
                term.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("    {line}");
}

/// Display each topic in `weight*"term" + ...` form.
pub fn display_topics(summary: &TopicSummary) {
    println!(
        "\n{}",
        format!(
            "=== Topics (k = {}, vocabulary {}) ===",
            summary.num_topics, summary.vocabulary_size
        )
        .bold()
    );
    for topic in &summary.topics {
        println!("  {:<9} {}", topic_label(topic.index), topic.formatted());
    }
}

/// One-based display label for a zero-based topic index.
fn topic_label(index: usize) -> String {
    format!("Topic #{}:", index + 1)
}

fn display_unavailable(section: &str, reason: &str) {
    println!("\n{}", format!("=== {section} ===").bold());
    println!("  {} {}", "~".yellow(), reason.yellow());
}

/// Colorize a polarity band label.
fn colorize_band(band: PolarityBand) -> colored::ColoredString {
    let label = band.to_string();
    match band {
        PolarityBand::Positive => label.green().bold(),
        PolarityBand::Neutral => label.normal(),
        PolarityBand::Negative => label.red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_labels_are_one_based() {
        assert_eq!(topic_label(0), "Topic #1:");
        assert_eq!(topic_label(9), "Topic #10:");
    }
}
