//! Price feature derivation.
//!
//! Filtering comes first: bars with any missing required field are removed,
//! then returns and volatility are computed over the surviving sequence.
//! That ordering means a return can span a removed row; the bridged value is
//! the reference behavior and is pinned by tests.

use crate::domain::PriceBar;
use crate::stats::describe::{mean_f64, std_dev};

/// Filtered bars plus feature columns parallel to `bars`.
#[derive(Debug, Clone)]
pub struct DerivedPrices {
    pub bars: Vec<PriceBar>,
    pub daily_return: Vec<Option<f64>>,
    pub volatility: Vec<Option<f64>>,
}

/// Removes bars with missing required fields, preserving order.
pub fn drop_incomplete(bars: &[PriceBar]) -> Vec<PriceBar> {
    bars.iter().filter(|b| b.is_complete()).cloned().collect()
}

/// Simple one-step returns: `(p[i] - p[i-1]) / p[i-1]`.
///
/// The first element is always `None`; a zero previous price also yields
/// `None` since no meaningful return exists.
pub fn daily_returns(prices: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(prices.len());
    for (i, price) in prices.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let prev = prices[i - 1];
        if prev == 0.0 {
            out.push(None);
        } else {
            out.push(Some((price - prev) / prev));
        }
    }
    out
}

/// Rolling sample standard deviation.
///
/// The first `window - 1` positions are `None`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 2, "rolling window must be at least 2");
    let mut out = vec![None; values.len()];
    if values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = mean_f64(slice);
        out[i] = Some(std_dev(slice, mean));
    }
    out
}

/// Runs the full derivation: filter, then returns and volatility over the
/// filtered adjusted closes.
pub fn derive(bars: &[PriceBar], volatility_window: usize) -> DerivedPrices {
    let kept = drop_incomplete(bars);
    let adj: Vec<f64> = kept.iter().map(|b| b.adj_close).collect();
    let daily_return = daily_returns(&adj);
    let volatility = rolling_std(&adj, volatility_window);
    DerivedPrices {
        bars: kept,
        daily_return,
        volatility,
    }
}
