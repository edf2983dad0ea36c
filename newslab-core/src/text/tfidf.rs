//! TF-IDF vectorization over tokenized headlines.

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, Axis};

use crate::text::tokenizer::bigrams;

#[derive(Debug, Clone)]
pub struct TfidfOptions {
    /// Keep at most this many terms, most frequent first.
    pub max_features: usize,
    /// Drop terms appearing in fewer documents than this.
    pub min_df: usize,
    /// Drop terms appearing in more than this fraction of documents.
    pub max_df_ratio: f64,
    /// Extend each document with adjacent-pair bigrams.
    pub bigrams: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            max_features: 1000,
            min_df: 1,
            max_df_ratio: 1.0,
            bigrams: true,
        }
    }
}

/// Fitted vocabulary with per-term inverse document frequencies.
///
/// IDF uses the smoothed form `ln((1 + n) / (1 + df)) + 1`, and transformed
/// rows are L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    n_documents: usize,
    use_bigrams: bool,
}

impl TfidfModel {
    pub fn fit(docs: &[Vec<String>], options: &TfidfOptions) -> Self {
        let expanded = expand(docs, options.bigrams);
        let n_docs = expanded.len();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &expanded {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let max_df = (n_docs as f64 * options.max_df_ratio) as usize;
        let mut kept: Vec<(&str, usize)> = df
            .into_iter()
            .filter(|(_, f)| *f >= options.min_df && *f <= max_df)
            .collect();
        // Most frequent first; alphabetical among ties so truncation is stable.
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(options.max_features);

        let df_by_term: HashMap<String, usize> =
            kept.into_iter().map(|(t, f)| (t.to_string(), f)).collect();
        let mut terms: Vec<String> = df_by_term.keys().cloned().collect();
        terms.sort();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| {
                let df = df_by_term[t.as_str()] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Self {
            vocabulary,
            terms,
            idf,
            n_documents: n_docs,
            use_bigrams: options.bigrams,
        }
    }

    pub fn fit_transform(docs: &[Vec<String>], options: &TfidfOptions) -> (Self, Array2<f64>) {
        let model = Self::fit(docs, options);
        let matrix = model.transform(docs);
        (model, matrix)
    }

    /// Weighted document-term matrix, one L2-normalized row per document.
    pub fn transform(&self, docs: &[Vec<String>]) -> Array2<f64> {
        let mut matrix = self.counts(docs);
        for mut row in matrix.rows_mut() {
            for (col, value) in row.iter_mut().enumerate() {
                *value *= self.idf[col];
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }
        matrix
    }

    /// Raw in-vocabulary term counts, no weighting. Topic models sample from
    /// counts, not weights.
    pub fn counts(&self, docs: &[Vec<String>]) -> Array2<f64> {
        let expanded = expand(docs, self.use_bigrams);
        let mut matrix = Array2::zeros((expanded.len(), self.terms.len()));
        for (row, doc) in expanded.iter().enumerate() {
            for token in doc {
                if let Some(&col) = self.vocabulary.get(token.as_str()) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }
        matrix
    }

    /// Terms ranked by mean weight across all rows, heaviest first.
    pub fn top_terms_by_mean(&self, matrix: &Array2<f64>, n: usize) -> Vec<(String, f64)> {
        let means = match matrix.mean_axis(Axis(0)) {
            Some(means) => means,
            None => return Vec::new(),
        };
        let mut ranked: Vec<(String, f64)> = self
            .terms
            .iter()
            .cloned()
            .zip(means.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Vocabulary in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

fn expand(docs: &[Vec<String>], use_bigrams: bool) -> Vec<Vec<String>> {
    docs.iter()
        .map(|doc| {
            let mut expanded = doc.clone();
            if use_bigrams {
                expanded.extend(bigrams(doc));
            }
            expanded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn unigram_options() -> TfidfOptions {
        TfidfOptions {
            bigrams: false,
            ..TfidfOptions::default()
        }
    }

    #[test]
    fn vocabulary_is_alphabetical() {
        let docs = vec![doc(&["zebra", "apple"]), doc(&["mango", "apple"])];
        let model = TfidfModel::fit(&docs, &unigram_options());
        assert_eq!(model.terms(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn rare_terms_get_higher_idf_than_ubiquitous_ones() {
        let docs = vec![
            doc(&["stock", "surge"]),
            doc(&["stock", "tumble"]),
            doc(&["stock", "surge"]),
        ];
        let model = TfidfModel::fit(&docs, &unigram_options());
        let matrix = model.transform(&docs);
        let stock_col = model.terms().iter().position(|t| t == "stock").unwrap();
        let tumble_col = model.terms().iter().position(|t| t == "tumble").unwrap();
        // Row 1 contains both; the rarer term must outweigh the common one.
        assert!(matrix[[1, tumble_col]] > matrix[[1, stock_col]]);
    }

    #[test]
    fn rows_are_unit_length() {
        let docs = vec![doc(&["rate", "hike", "fear"]), doc(&["rate", "cut"])];
        let (_, matrix) = TfidfModel::fit_transform(&docs, &unigram_options());
        for row in matrix.rows() {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_document_row_is_all_zero() {
        let docs = vec![doc(&["alpha"]), doc(&[])];
        let (_, matrix) = TfidfModel::fit_transform(&docs, &unigram_options());
        assert!(matrix.row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn min_df_drops_singletons() {
        let docs = vec![
            doc(&["common", "rare"]),
            doc(&["common"]),
            doc(&["common"]),
        ];
        let options = TfidfOptions {
            min_df: 2,
            bigrams: false,
            ..TfidfOptions::default()
        };
        let model = TfidfModel::fit(&docs, &options);
        assert_eq!(model.terms(), &["common"]);
    }

    #[test]
    fn max_df_ratio_drops_ubiquitous_terms() {
        let docs = vec![
            doc(&["everywhere", "alpha"]),
            doc(&["everywhere", "beta"]),
            doc(&["everywhere", "alpha"]),
        ];
        let options = TfidfOptions {
            max_df_ratio: 0.67,
            bigrams: false,
            ..TfidfOptions::default()
        };
        let model = TfidfModel::fit(&docs, &options);
        assert!(!model.terms().contains(&"everywhere".to_string()));
        assert!(model.terms().contains(&"alpha".to_string()));
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let docs = vec![
            doc(&["a1", "b2"]),
            doc(&["a1", "c3"]),
            doc(&["a1", "b2"]),
        ];
        let options = TfidfOptions {
            max_features: 2,
            bigrams: false,
            ..TfidfOptions::default()
        };
        let model = TfidfModel::fit(&docs, &options);
        assert_eq!(model.len(), 2);
        assert!(model.terms().contains(&"a1".to_string()));
        assert!(model.terms().contains(&"b2".to_string()));
        assert!(!model.terms().contains(&"c3".to_string()));
    }

    #[test]
    fn bigram_expansion_reaches_vocabulary() {
        let docs = vec![doc(&["interest", "rate"]), doc(&["interest", "rate"])];
        let model = TfidfModel::fit(&docs, &TfidfOptions::default());
        assert!(model.terms().contains(&"interest_rate".to_string()));
    }

    #[test]
    fn counts_are_raw_occurrences() {
        let docs = vec![doc(&["buy", "buy", "sell"])];
        let model = TfidfModel::fit(&docs, &unigram_options());
        let counts = model.counts(&docs);
        let buy_col = model.terms().iter().position(|t| t == "buy").unwrap();
        assert_eq!(counts[[0, buy_col]], 2.0);
    }

    #[test]
    fn top_terms_rank_by_mean_weight() {
        let docs = vec![doc(&["hot", "hot", "cold"]), doc(&["hot"])];
        let (model, matrix) = TfidfModel::fit_transform(&docs, &unigram_options());
        let top = model.top_terms_by_mean(&matrix, 1);
        assert_eq!(top[0].0, "hot");
    }

    #[test]
    fn fitting_on_nothing_is_empty() {
        let model = TfidfModel::fit(&[], &TfidfOptions::default());
        assert!(model.is_empty());
        assert_eq!(model.n_documents(), 0);
    }
}
