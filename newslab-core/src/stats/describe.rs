//! Descriptive statistics over headlines and numeric series.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::NewsRecord;

/// Summary of a numeric series in the shape analysts expect from `describe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Summarizes a series. `None` for empty input.
pub fn summarize(values: &[f64]) -> Option<SeriesSummary> {
    if values.is_empty() {
        return None;
    }
    let mean = mean_f64(values);
    let std = std_dev(values, mean);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(SeriesSummary {
        count: values.len(),
        mean,
        std,
        min: sorted[0],
        median: median_of_sorted(&sorted),
        max: sorted[sorted.len() - 1],
    })
}

/// Headline-level profile: volume, duplication, lengths, repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineStats {
    pub total: usize,
    pub unique: usize,
    pub length: Option<SeriesSummary>,
    /// Most repeated headlines, descending by count.
    pub most_frequent: Vec<(String, usize)>,
}

pub fn headline_stats(records: &[NewsRecord], top_n: usize) -> HeadlineStats {
    let lengths: Vec<f64> = records
        .iter()
        .map(|r| r.headline.chars().count() as f64)
        .collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        *counts.entry(rec.headline.as_str()).or_insert(0) += 1;
    }
    let unique = counts.len();
    let mut most_frequent: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(h, c)| (h.to_string(), c))
        .collect();
    // Ties break alphabetically so output is stable across runs.
    most_frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    most_frequent.truncate(top_n);
    HeadlineStats {
        total: records.len(),
        unique,
        length: summarize(&lengths),
        most_frequent,
    }
}

/// The strongest-scoring headlines at both ends of the scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentExtremes {
    pub most_positive: Vec<(String, f64)>,
    pub most_negative: Vec<(String, f64)>,
}

pub fn sentiment_extremes(records: &[NewsRecord], n: usize) -> SentimentExtremes {
    let mut scored: Vec<(&str, f64)> = records
        .iter()
        .filter_map(|r| {
            r.sentiment
                .filter(|s| s.is_finite())
                .map(|s| (r.headline.as_str(), s))
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let most_positive = scored
        .iter()
        .take(n)
        .map(|(h, s)| (h.to_string(), *s))
        .collect();
    let most_negative = scored
        .iter()
        .rev()
        .take(n)
        .map(|(h, s)| (h.to_string(), *s))
        .collect();
    SentimentExtremes {
        most_positive,
        most_negative,
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1). Zero for fewer than two values.
pub(crate) fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
