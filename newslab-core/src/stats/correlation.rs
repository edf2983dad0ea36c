//! Pearson correlation with pairwise-complete handling.
//!
//! An undefined correlation is a value, not an error: too few complete
//! pairs or a constant series yields `None`, and reports render it as
//! `n/a` rather than a silent zero.

use serde::{Deserialize, Serialize};

use crate::domain::AlignedRow;

/// Column labels of the aligned correlation matrix, in order.
pub const MATRIX_COLUMNS: &[&str] = &["sentiment", "daily_return", "adj_close"];

/// Pearson r over pairwise-complete observations.
///
/// Pairs where either side is non-finite are dropped first. `None` when
/// fewer than two pairs remain or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

/// The headline question: does daily mean sentiment move with daily returns?
///
/// The first joined row never has a return, so a two-row table has a single
/// complete pair and the answer is `None`.
pub fn sentiment_return_correlation(rows: &[AlignedRow]) -> Option<f64> {
    let xs: Vec<f64> = rows.iter().map(|r| r.mean_sentiment).collect();
    let ys: Vec<f64> = rows
        .iter()
        .map(|r| r.daily_return.unwrap_or(f64::NAN))
        .collect();
    pearson(&xs, &ys)
}

/// Pairwise correlation over {sentiment, daily_return, adj_close}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn cell(&self, i: usize, j: usize) -> Option<f64> {
        self.cells.get(i).and_then(|row| row.get(j)).copied().flatten()
    }
}

pub fn correlation_matrix(rows: &[AlignedRow]) -> CorrelationMatrix {
    let columns: [Vec<f64>; 3] = [
        rows.iter().map(|r| r.mean_sentiment).collect(),
        rows.iter()
            .map(|r| r.daily_return.unwrap_or(f64::NAN))
            .collect(),
        rows.iter().map(|r| r.adj_close).collect(),
    ];
    // The diagonal goes through the same pairwise path, so a constant
    // column is None against itself too.
    let cells = (0..columns.len())
        .map(|i| {
            (0..columns.len())
                .map(|j| pearson(&columns[i], &columns[j]))
                .collect()
        })
        .collect();
    CorrelationMatrix {
        labels: MATRIX_COLUMNS.iter().map(|s| s.to_string()).collect(),
        cells,
    }
}
