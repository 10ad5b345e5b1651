// Latent Dirichlet Allocation fitted by variational Bayes.
//
// This is the online-LDA update of Hoffman, Blei & Bach run in batch mode:
// every pass does a full E-step over the corpus, then blends the topic-word
// parameters toward the new sufficient statistics with step size
// rho = (1 + pass)^-0.5. Priors are symmetric (alpha = eta = 1/k).
//
// Initial topic-word parameters and each document's starting gamma are drawn
// from Gamma(100, 1/100) with a seeded StdRng, so identical input and seed
// always give identical topics.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};
use tracing::debug;

use super::dictionary::BagOfWords;
use crate::error::{AnalysisError, Result};

/// Fitting parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LdaConfig {
    /// Full sweeps over the corpus
    pub passes: usize,
    /// Max per-document E-step iterations
    pub iterations: usize,
    /// Seed for all random draws
    pub random_state: u64,
    /// Per-document E-step stops once mean |Δgamma| drops below this
    pub gamma_threshold: f64,
    /// Learning-rate decay (kappa)
    pub decay: f64,
    /// Learning-rate offset (tau0)
    pub offset: f64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            passes: 10,
            iterations: 50,
            random_state: 100,
            gamma_threshold: 0.001,
            decay: 0.5,
            offset: 1.0,
        }
    }
}

/// Shape and scale of the Gamma used to initialize variational parameters.
const INIT_SHAPE: f64 = 100.0;
const INIT_SCALE: f64 = 1.0 / 100.0;

/// Guards against division by zero in the phi normalizer.
const PHI_EPSILON: f64 = 1e-100;

/// A fitted topic model: `lambda` is the k x V variational topic-word matrix.
#[derive(Debug, Clone)]
pub struct LdaModel {
    num_topics: usize,
    num_terms: usize,
    lambda: Vec<f64>,
}

impl LdaModel {
    /// Fit `num_topics` topics to `corpus` over a vocabulary of `num_terms`.
    pub fn fit(
        corpus: &[BagOfWords],
        num_terms: usize,
        num_topics: usize,
        config: &LdaConfig,
    ) -> Result<Self> {
        if num_topics == 0 {
            return Err(AnalysisError::Modeling("number of topics must be positive".into()));
        }
        if num_terms == 0 {
            return Err(AnalysisError::Modeling("empty vocabulary".into()));
        }
        let total_count: usize = corpus.iter().flatten().map(|&(_, c)| c).sum();
        if total_count == 0 {
            return Err(AnalysisError::Modeling("corpus contains no terms".into()));
        }
        if let Some(&(id, _)) = corpus.iter().flatten().find(|&&(id, _)| id >= num_terms) {
            return Err(AnalysisError::Modeling(format!(
                "term id {id} outside vocabulary of {num_terms}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(config.random_state);
        let init = Gamma::new(INIT_SHAPE, INIT_SCALE)
            .map_err(|e| AnalysisError::Modeling(format!("bad initializer: {e}")))?;

        let k = num_topics;
        let v = num_terms;
        let alpha = 1.0 / k as f64;
        let eta = 1.0 / k as f64;

        let mut lambda: Vec<f64> = (0..k * v).map(|_| init.sample(&mut rng)).collect();

        for pass in 0..config.passes {
            let exp_elog_beta = exp_dirichlet_expectation_rows(&lambda, k, v);

            let mut sstats = vec![0.0; k * v];
            for doc in corpus {
                e_step_document(doc, &exp_elog_beta, k, v, alpha, config, &init, &mut rng, &mut sstats);
            }
            for (s, b) in sstats.iter_mut().zip(&exp_elog_beta) {
                *s *= b;
            }

            let rho = (config.offset + pass as f64).powf(-config.decay);
            for (l, s) in lambda.iter_mut().zip(&sstats) {
                *l = (1.0 - rho) * *l + rho * (eta + s);
            }

            debug!(pass, rho, "LDA pass complete");
        }

        if lambda.iter().any(|x| !x.is_finite()) {
            return Err(AnalysisError::Modeling(
                "inference diverged (non-finite topic weights)".into(),
            ));
        }

        Ok(Self {
            num_topics: k,
            num_terms: v,
            lambda,
        })
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// Topic `topic`'s distribution over the vocabulary (sums to 1).
    pub fn topic_distribution(&self, topic: usize) -> Vec<f64> {
        let row = &self.lambda[topic * self.num_terms..(topic + 1) * self.num_terms];
        let sum: f64 = row.iter().sum();
        if sum <= 0.0 {
            return vec![0.0; self.num_terms];
        }
        row.iter().map(|x| x / sum).collect()
    }

    /// The `n` highest-weight term ids of `topic`, ties broken by lower id.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> =
            self.topic_distribution(topic).into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Variational E-step for one document; accumulates into `sstats`
/// (before the final multiply by exp(E[log beta])).
#[allow(clippy::too_many_arguments)]
fn e_step_document(
    doc: &BagOfWords,
    exp_elog_beta: &[f64],
    k: usize,
    v: usize,
    alpha: f64,
    config: &LdaConfig,
    init: &Gamma<f64>,
    rng: &mut StdRng,
    sstats: &mut [f64],
) {
    if doc.is_empty() {
        return;
    }

    let ids: Vec<usize> = doc.iter().map(|&(id, _)| id).collect();
    let cts: Vec<f64> = doc.iter().map(|&(_, c)| c as f64).collect();
    let beta_at = |topic: usize, j: usize| exp_elog_beta[topic * v + ids[j]];

    let mut gamma: Vec<f64> = (0..k).map(|_| init.sample(rng)).collect();
    let mut exp_elog_theta = exp_dirichlet_expectation(&gamma);
    let mut phinorm = phi_normalizer(&exp_elog_theta, &beta_at, ids.len());

    for _ in 0..config.iterations {
        let last_gamma = gamma.clone();

        for (topic, g) in gamma.iter_mut().enumerate() {
            let dot: f64 = (0..ids.len())
                .map(|j| cts[j] / phinorm[j] * beta_at(topic, j))
                .sum();
            *g = alpha + exp_elog_theta[topic] * dot;
        }

        exp_elog_theta = exp_dirichlet_expectation(&gamma);
        phinorm = phi_normalizer(&exp_elog_theta, &beta_at, ids.len());

        let mean_change = gamma
            .iter()
            .zip(&last_gamma)
            .map(|(a, b)| (a - b).abs())
            .sum::<f64>()
            / k as f64;
        if mean_change < config.gamma_threshold {
            break;
        }
    }

    for topic in 0..k {
        for (j, &id) in ids.iter().enumerate() {
            sstats[topic * v + id] += exp_elog_theta[topic] * cts[j] / phinorm[j];
        }
    }
}

fn phi_normalizer(
    exp_elog_theta: &[f64],
    beta_at: &impl Fn(usize, usize) -> f64,
    n_ids: usize,
) -> Vec<f64> {
    (0..n_ids)
        .map(|j| {
            exp_elog_theta
                .iter()
                .enumerate()
                .map(|(topic, t)| t * beta_at(topic, j))
                .sum::<f64>()
                + PHI_EPSILON
        })
        .collect()
}

/// exp(E[log x]) for x ~ Dirichlet(params).
fn exp_dirichlet_expectation(params: &[f64]) -> Vec<f64> {
    let psi_total = digamma(params.iter().sum());
    params.iter().map(|&p| (digamma(p) - psi_total).exp()).collect()
}

/// Row-wise [`exp_dirichlet_expectation`] over a row-major `rows x cols` matrix.
fn exp_dirichlet_expectation_rows(matrix: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        out.extend(exp_dirichlet_expectation(&matrix[r * cols..(r + 1) * cols]));
    }
    out
}

/// Digamma function for positive arguments.
///
/// Shifts x above 6 with psi(x) = psi(x + 1) - 1/x, then applies the
/// asymptotic series.
pub fn digamma(mut x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return f64::NAN;
    }

    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }

    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2
            * (1.0 / 12.0
                - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digamma_known_values() {
        // psi(1) = -Euler-Mascheroni
        assert!((digamma(1.0) + 0.577_215_664_901_532_9).abs() < 1e-10);
        // psi(0.5) = -gamma - 2 ln 2
        assert!((digamma(0.5) + 1.963_510_026_021_423_5).abs() < 1e-10);
        // psi(10) = H_9 - gamma
        let h9: f64 = (1..10).map(|n| 1.0 / n as f64).sum();
        assert!((digamma(10.0) - (h9 - 0.577_215_664_901_532_9)).abs() < 1e-10);
        assert!(digamma(0.0).is_nan());
    }

    #[test]
    fn test_rejects_empty_inputs() {
        let cfg = LdaConfig::default();
        assert!(LdaModel::fit(&[vec![(0, 1)]], 0, 2, &cfg).is_err());
        assert!(LdaModel::fit(&[vec![]], 3, 2, &cfg).is_err());
        assert!(LdaModel::fit(&[vec![(5, 1)]], 3, 2, &cfg).is_err());
        assert!(LdaModel::fit(&[vec![(0, 1)]], 1, 0, &cfg).is_err());
    }

    #[test]
    fn test_distributions_are_normalized() {
        let corpus = vec![vec![(0, 4), (1, 2), (2, 1), (3, 1)]];
        let model = LdaModel::fit(&corpus, 4, 3, &LdaConfig::default()).unwrap();
        assert_eq!(model.num_topics(), 3);
        for topic in 0..3 {
            let dist = model.topic_distribution(topic);
            let sum: f64 = dist.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "topic {topic} sums to {sum}");
            assert!(dist.iter().all(|w| *w > 0.0));
        }
    }

    #[test]
    fn test_frequent_term_dominates_single_document() {
        let corpus = vec![vec![(0, 50), (1, 2), (2, 1)]];
        let model = LdaModel::fit(&corpus, 3, 2, &LdaConfig::default()).unwrap();
        // With one document every topic should put the most mass on term 0
        for topic in 0..2 {
            assert_eq!(model.top_terms(topic, 1)[0].0, 0);
        }
    }

    #[test]
    fn test_same_seed_same_model() {
        let corpus = vec![vec![(0, 3), (1, 5), (2, 2), (3, 7)]];
        let cfg = LdaConfig::default();
        let a = LdaModel::fit(&corpus, 4, 3, &cfg).unwrap();
        let b = LdaModel::fit(&corpus, 4, 3, &cfg).unwrap();
        for topic in 0..3 {
            assert_eq!(a.topic_distribution(topic), b.topic_distribution(topic));
        }
    }

    #[test]
    fn test_different_seed_changes_model() {
        let corpus = vec![vec![(0, 3), (1, 5), (2, 2), (3, 7)]];
        let a = LdaModel::fit(&corpus, 4, 3, &LdaConfig::default()).unwrap();
        let b = LdaModel::fit(
            &corpus,
            4,
            3,
            &LdaConfig {
                random_state: 7,
                ..LdaConfig::default()
            },
        )
        .unwrap();
        assert_ne!(a.topic_distribution(0), b.topic_distribution(0));
    }
}
