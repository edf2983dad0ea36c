//! Technical indicators over daily price bars.
//!
//! Every indicator emits one value per input bar, NaN through its warmup
//! and wherever the inputs were NaN. Multi-series indicators (MACD) are
//! exposed as separate named instances per series, keeping the
//! single-series `Indicator` trait unchanged.
//!
//! Names carry the actual window, so `sma_10` really is a 10-day mean.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::Atr;
pub use ema::Ema;
pub use macd::{Macd, MacdSeries};
pub use rsi::Rsi;
pub use sma::Sma;

use std::collections::HashMap;

use crate::domain::PriceBar;

/// A named series derived bar-by-bar from prices.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &str;

    /// Bars consumed before the first non-NaN value.
    fn lookback(&self) -> usize;

    /// One output value per input bar.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Computed indicator series keyed by name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorTable {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index)).copied()
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Series names in sorted order, for stable iteration and export.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.series.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Last finite value of a series, if any.
    pub fn last_value(&self, name: &str) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.iter().rev().find(|x| x.is_finite()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Computes every indicator in the panel over the same bars.
pub fn enrich(bars: &[PriceBar], indicators: &[Box<dyn Indicator>]) -> IndicatorTable {
    let mut table = IndicatorTable::new();
    for indicator in indicators {
        table.insert(indicator.name().to_string(), indicator.compute(bars));
    }
    table
}

/// The default panel: SMA and RSI at 10 and 20 days, the 12/26/9 MACD
/// triple, and ATR over `atr_period`.
pub fn standard_panel(atr_period: usize) -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Sma::new(10)),
        Box::new(Sma::new(20)),
        Box::new(Rsi::new(10)),
        Box::new(Rsi::new(20)),
        Box::new(Macd::new(12, 26, 9, MacdSeries::Line)),
        Box::new(Macd::new(12, 26, 9, MacdSeries::Signal)),
        Box::new(Macd::new(12, 26, 9, MacdSeries::Histogram)),
        Box::new(Atr::new(atr_period)),
    ]
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                adj_close: close,
                volume: 1000.0,
                dividends: None,
                stock_splits: None,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
