use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docsight::config::Config;
use docsight::extract::load_pdf;
use docsight::output::{self, terminal};
use docsight::pipeline::{AnalysisSession, AnalysisSettings, Report};
use docsight::topics::{TopicCount, TopicSummary};

/// Docsight: text analytics for PDF reports.
///
/// Extracts the text of a PDF and reports sentence sentiment, word
/// frequencies and LDA topics.
#[derive(Parser)]
#[command(name = "docsight", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a PDF file
    Analyze {
        /// Path to the PDF
        path: PathBuf,

        /// Number of topics, 2-15 (default: DOCSIGHT_TOPICS or 10)
        #[arg(long, value_parser = parse_topic_count)]
        topics: Option<TopicCount>,

        /// Print the report as JSON instead of a terminal summary
        #[arg(long)]
        json: bool,
    },

    /// Analyze the bundled sample report
    Sample {
        /// Number of topics, 2-15 (default: DOCSIGHT_TOPICS or 10)
        #[arg(long, value_parser = parse_topic_count)]
        topics: Option<TopicCount>,

        /// Print the report as JSON instead of a terminal summary
        #[arg(long)]
        json: bool,
    },

    /// Fit topics for one PDF at several topic counts
    Topics {
        /// Path to the PDF
        path: PathBuf,

        /// Topic counts to fit (repeatable, e.g. --topics 3 --topics 8)
        #[arg(long, required = true, value_parser = parse_topic_count)]
        topics: Vec<TopicCount>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docsight=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { path, topics, json } => {
            let num_topics = topics.unwrap_or(config.default_topics);
            let report = analyze_file(&config, &path, num_topics).await?;
            print_report(&report, json)?;
        }

        Commands::Sample { topics, json } => {
            config.require_sample()?;
            let num_topics = topics.unwrap_or(config.default_topics);
            let path = config.sample_pdf.clone();
            let report = analyze_file(&config, &path, num_topics).await?;
            print_report(&report, json)?;
        }

        Commands::Topics { path, topics } => {
            let bytes = read_pdf(&path)?;
            let source = path.display().to_string();
            let settings = config.analysis_settings();

            let spinner = spinner(format!("Modeling topics for {source}..."));
            let task = tokio::task::spawn_blocking(move || {
                sweep_topic_counts(settings, &source, &bytes, &topics)
            });
            let outcome = run_bounded(task, config.timeout).await;
            spinner.finish_and_clear();
            let (report, fits) = outcome?;

            match report {
                TopicSweep::NoText(report) => terminal::display_report(&report),
                TopicSweep::Fitted(results) => {
                    for (k, result) in &results {
                        match result {
                            Ok(summary) => terminal::display_topics(summary),
                            Err(reason) => println!(
                                "\n{} k = {}: {}",
                                "~".yellow(),
                                k,
                                reason.yellow()
                            ),
                        }
                    }
                    println!(
                        "\n{}",
                        format!("{} model fits for {} requests", fits, results.len()).dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}

/// Clap value parser enforcing the supported topic range.
fn parse_topic_count(raw: &str) -> std::result::Result<TopicCount, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    TopicCount::new(value).map_err(|e| e.to_string())
}

fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    let bytes = load_pdf(path)?;
    info!(path = %path.display(), bytes = bytes.len(), "Loaded PDF");
    Ok(bytes)
}

/// Run the full pipeline for one file on the blocking pool.
async fn analyze_file(config: &Config, path: &Path, num_topics: TopicCount) -> Result<Report> {
    let bytes = read_pdf(path)?;
    let source = path.display().to_string();
    let settings = config.analysis_settings();

    let spinner = spinner(format!("Analyzing {source}..."));
    let task = tokio::task::spawn_blocking(move || {
        let mut session = AnalysisSession::new(settings);
        session.analyze(&source, &bytes, num_topics)
    });
    let report = run_bounded(task, config.timeout).await;
    spinner.finish_and_clear();
    report
}

/// Await a blocking task, giving up after `limit`. A timed-out task is
/// abandoned, not cancelled.
async fn run_bounded<T>(task: tokio::task::JoinHandle<T>, limit: Duration) -> Result<T> {
    tokio::time::timeout(limit, task)
        .await
        .map_err(|_| anyhow::anyhow!("Analysis timed out after {}s", limit.as_secs()))?
        .context("Analysis task failed")
}

enum TopicSweep {
    NoText(Report),
    Fitted(Vec<(TopicCount, std::result::Result<TopicSummary, String>)>),
}

/// Analyze once, then refit topics at each requested count.
fn sweep_topic_counts(
    settings: AnalysisSettings,
    source: &str,
    bytes: &[u8],
    counts: &[TopicCount],
) -> (TopicSweep, usize) {
    let mut session = AnalysisSession::new(settings);
    let first = counts.first().copied().unwrap_or_default();
    let report = session.analyze(source, bytes, first);
    if matches!(report, Report::NoText { .. }) {
        return (TopicSweep::NoText(report), 0);
    }

    let results = counts
        .iter()
        .map(|&k| {
            let result = session
                .retopic(k)
                .map(|summary| (*summary).clone())
                .map_err(|e| e.to_string());
            (k, result)
        })
        .collect();
    (TopicSweep::Fitted(results), session.topic_fits())
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", output::report_json(report)?);
    } else {
        terminal::display_report(report);
    }
    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
