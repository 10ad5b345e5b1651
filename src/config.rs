use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pipeline::AnalysisSettings;
use crate::sentiment::DEFAULT_HISTOGRAM_BINS;
use crate::topics::lda::LdaConfig;
use crate::topics::TopicCount;

/// Default bundled sample report analyzed by `docsight sample`.
pub const DEFAULT_SAMPLE_PDF: &str = "Tata Steel Annual Report 2024-25.pdf";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// variable has a default; a set-but-unparseable value is an error.
#[derive(Debug, Clone)]
pub struct Config {
    /// PDF analyzed by the `sample` command
    pub sample_pdf: PathBuf,
    /// Topic count used when the command line doesn't give one
    pub default_topics: TopicCount,
    pub lda_passes: usize,
    pub lda_seed: u64,
    pub lda_iterations: usize,
    /// Upper bound on one analysis run
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let topics: usize = parse_var("DOCSIGHT_TOPICS", 10)?;
        let default_topics =
            TopicCount::new(topics).context("DOCSIGHT_TOPICS is out of range")?;

        let lda_passes: usize = parse_var("DOCSIGHT_LDA_PASSES", 10)?;
        if lda_passes == 0 {
            anyhow::bail!("DOCSIGHT_LDA_PASSES must be at least 1");
        }
        let lda_iterations: usize = parse_var("DOCSIGHT_LDA_ITERATIONS", 50)?;
        if lda_iterations == 0 {
            anyhow::bail!("DOCSIGHT_LDA_ITERATIONS must be at least 1");
        }

        Ok(Self {
            sample_pdf: env::var("DOCSIGHT_SAMPLE_PDF")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SAMPLE_PDF)),
            default_topics,
            lda_passes,
            lda_seed: parse_var("DOCSIGHT_LDA_SEED", 100)?,
            lda_iterations,
            timeout: Duration::from_secs(parse_var("DOCSIGHT_TIMEOUT_SECS", 300)?),
        })
    }

    /// LDA parameters derived from this config.
    pub fn lda_config(&self) -> LdaConfig {
        LdaConfig {
            passes: self.lda_passes,
            iterations: self.lda_iterations,
            random_state: self.lda_seed,
            ..LdaConfig::default()
        }
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            lda: self.lda_config(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    /// Check that the sample report exists.
    /// Call this before the `sample` command reads it.
    pub fn require_sample(&self) -> Result<()> {
        if !self.sample_pdf.is_file() {
            anyhow::bail!(
                "Sample report not found at {}\n\
                 Place the PDF there or set DOCSIGHT_SAMPLE_PDF in your .env file.",
                self.sample_pdf.display()
            );
        }
        Ok(())
    }
}

/// Read `name` and parse it, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; each test uses its own variable name.

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: usize = parse_var("DOCSIGHT_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_var_reads_value() {
        env::set_var("DOCSIGHT_TEST_SET_VAR", " 7 ");
        let value: u64 = parse_var("DOCSIGHT_TEST_SET_VAR", 1).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("DOCSIGHT_TEST_BAD_VAR", "ten");
        let err = parse_var::<usize>("DOCSIGHT_TEST_BAD_VAR", 1).unwrap_err();
        assert!(err.to_string().contains("DOCSIGHT_TEST_BAD_VAR"));
    }

    #[test]
    fn test_lda_config_carries_overrides() {
        let config = Config {
            sample_pdf: PathBuf::from(DEFAULT_SAMPLE_PDF),
            default_topics: TopicCount::default(),
            lda_passes: 3,
            lda_seed: 7,
            lda_iterations: 20,
            timeout: Duration::from_secs(5),
        };
        let lda = config.lda_config();
        assert_eq!(lda.passes, 3);
        assert_eq!(lda.random_state, 7);
        assert_eq!(lda.iterations, 20);
        assert_eq!(lda.gamma_threshold, LdaConfig::default().gamma_threshold);
    }

    #[test]
    fn test_missing_sample_is_reported() {
        let config = Config {
            sample_pdf: PathBuf::from("/nonexistent/report.pdf"),
            default_topics: TopicCount::default(),
            lda_passes: 10,
            lda_seed: 100,
            lda_iterations: 50,
            timeout: Duration::from_secs(300),
        };
        let err = config.require_sample().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.pdf"));
    }
}
