//! PriceBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single ticker on a single trading day.
///
/// Missing numeric cells are represented as NaN so that a bar survives
/// loading even when the source CSV has holes. Feature derivation filters
/// incomplete bars out before computing anything (see `pipeline::derive`).
/// `dividends` and `stock_splits` are carried when the source provides the
/// columns; they never reach the aligned output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
    pub dividends: Option<f64>,
    pub stock_splits: Option<f64>,
}

impl PriceBar {
    /// Returns true if every required numeric field is present (non-NaN).
    ///
    /// Required fields are open, high, low, close, adj_close and volume.
    /// `dividends`/`stock_splits` do not participate in completeness.
    pub fn is_complete(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.adj_close.is_finite()
            && self.volume.is_finite()
    }

    /// Basic OHLC sanity check: high >= low, high bounds open/close, positive prices.
    pub fn is_sane(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
