//! Latent Dirichlet Allocation via collapsed Gibbs sampling.
//!
//! Works on raw term counts from [`TfidfModel::counts`], not weighted rows.
//! A fixed seed makes runs reproducible.
//!
//! [`TfidfModel::counts`]: crate::text::tfidf::TfidfModel::counts

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LdaError {
    #[error("corpus has no tokens to model")]
    EmptyCorpus,
    #[error("topic count must be at least 1")]
    NoTopics,
    #[error("terms length {0} does not match matrix width {1}")]
    ShapeMismatch(usize, usize),
}

#[derive(Debug, Clone)]
pub struct LdaOptions {
    pub topics: usize,
    /// Document-topic smoothing prior.
    pub alpha: f64,
    /// Topic-word smoothing prior.
    pub beta: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LdaOptions {
    fn default() -> Self {
        Self {
            topics: 10,
            alpha: 0.1,
            beta: 0.01,
            iterations: 200,
            seed: 42,
        }
    }
}

/// One fitted topic: its heaviest words with smoothed probabilities, and the
/// share of all tokens assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdaTopic {
    pub index: usize,
    pub top_words: Vec<(String, f64)>,
    pub prevalence: f64,
}

#[derive(Debug, Clone)]
pub struct LdaModel {
    topic_word: Array2<f64>,
    topic_totals: Array1<f64>,
    total_tokens: f64,
    terms: Vec<String>,
    beta: f64,
}

impl LdaModel {
    pub fn fit(
        counts: &Array2<f64>,
        terms: &[String],
        options: &LdaOptions,
    ) -> Result<Self, LdaError> {
        if options.topics == 0 {
            return Err(LdaError::NoTopics);
        }
        let (n_docs, n_terms) = counts.dim();
        if terms.len() != n_terms {
            return Err(LdaError::ShapeMismatch(terms.len(), n_terms));
        }

        let k = options.topics;
        let mut rng = StdRng::seed_from_u64(options.seed);
        let mut topic_word = Array2::<f64>::zeros((k, n_terms));
        let mut doc_topic = Array2::<f64>::zeros((n_docs, k));
        let mut topic_totals = Array1::<f64>::zeros(k);

        // Flatten counts into per-document token instances with random
        // initial topic assignments.
        let mut docs: Vec<Vec<(usize, usize)>> = Vec::with_capacity(n_docs);
        for d in 0..n_docs {
            let mut tokens = Vec::new();
            for w in 0..n_terms {
                for _ in 0..counts[[d, w]] as usize {
                    let t = rng.gen_range(0..k);
                    tokens.push((w, t));
                    topic_word[[t, w]] += 1.0;
                    doc_topic[[d, t]] += 1.0;
                    topic_totals[t] += 1.0;
                }
            }
            docs.push(tokens);
        }
        let total_tokens = topic_totals.sum();
        if total_tokens == 0.0 {
            return Err(LdaError::EmptyCorpus);
        }

        let beta_sum = options.beta * n_terms as f64;
        let mut cumulative = vec![0.0; k];
        for _ in 0..options.iterations {
            for d in 0..n_docs {
                for i in 0..docs[d].len() {
                    let (w, old_t) = docs[d][i];
                    topic_word[[old_t, w]] -= 1.0;
                    doc_topic[[d, old_t]] -= 1.0;
                    topic_totals[old_t] -= 1.0;

                    let mut cum = 0.0;
                    for t in 0..k {
                        let p = (topic_word[[t, w]] + options.beta)
                            / (topic_totals[t] + beta_sum)
                            * (doc_topic[[d, t]] + options.alpha);
                        cum += p;
                        cumulative[t] = cum;
                    }
                    let draw = rng.gen::<f64>() * cum;
                    let new_t = cumulative
                        .iter()
                        .position(|&c| draw < c)
                        .unwrap_or(k - 1);

                    docs[d][i] = (w, new_t);
                    topic_word[[new_t, w]] += 1.0;
                    doc_topic[[d, new_t]] += 1.0;
                    topic_totals[new_t] += 1.0;
                }
            }
        }

        Ok(Self {
            topic_word,
            topic_totals,
            total_tokens,
            terms: terms.to_vec(),
            beta: options.beta,
        })
    }

    /// Topics in index order, each with its `top_n` heaviest words.
    pub fn topics(&self, top_n: usize) -> Vec<LdaTopic> {
        let (k, n_terms) = self.topic_word.dim();
        let beta_sum = self.beta * n_terms as f64;
        (0..k)
            .map(|t| {
                let denom = self.topic_totals[t] + beta_sum;
                let mut weighted: Vec<(String, f64)> = (0..n_terms)
                    .map(|w| {
                        let p = (self.topic_word[[t, w]] + self.beta) / denom;
                        (self.terms[w].clone(), p)
                    })
                    .collect();
                weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                weighted.truncate(top_n);
                LdaTopic {
                    index: t,
                    top_words: weighted,
                    prevalence: self.topic_totals[t] / self.total_tokens,
                }
            })
            .collect()
    }

    /// Smoothed word distribution per topic; every row sums to 1.
    pub fn topic_word_distribution(&self) -> Array2<f64> {
        let (k, n_terms) = self.topic_word.dim();
        let beta_sum = self.beta * n_terms as f64;
        let mut dist = self.topic_word.clone();
        for (t, mut row) in dist.rows_mut().into_iter().enumerate() {
            let denom = self.topic_totals[t] + beta_sum;
            row.mapv_inplace(|v| (v + self.beta) / denom);
        }
        dist
    }

    pub fn n_topics(&self) -> usize {
        self.topic_word.dim().0
    }
}
