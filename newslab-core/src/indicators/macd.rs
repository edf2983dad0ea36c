//! Moving Average Convergence Divergence (MACD).
//!
//! Line: EMA(fast) - EMA(slow) over close prices.
//! Signal: EMA(signal_period) of the line.
//! Histogram: line - signal.
//! Lookback: slow - 1 for the line, slow + signal_period - 2 for the rest.

use crate::domain::PriceBar;
use crate::indicators::ema::{ema_of_series, ema_skip_leading_nan};
use crate::indicators::Indicator;

/// Which of the three MACD outputs this instance emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdSeries {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    series: MacdSeries,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, series: MacdSeries) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        let name = match series {
            MacdSeries::Line => format!("macd_{fast}_{slow}"),
            MacdSeries::Signal => format!("macd_signal_{fast}_{slow}_{signal}"),
            MacdSeries::Histogram => format!("macd_hist_{fast}_{slow}_{signal}"),
        };
        Self {
            fast,
            slow,
            signal,
            series,
            name,
        }
    }

    fn line(&self, closes: &[f64]) -> Vec<f64> {
        let fast = ema_of_series(closes, self.fast);
        let slow = ema_of_series(closes, self.slow);
        // NaN on either side flows through the subtraction.
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.series {
            MacdSeries::Line => self.slow - 1,
            MacdSeries::Signal | MacdSeries::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let line = self.line(&closes);
        match self.series {
            MacdSeries::Line => line,
            MacdSeries::Signal => ema_skip_leading_nan(&line, self.signal),
            MacdSeries::Histogram => {
                let signal = ema_skip_leading_nan(&line, self.signal);
                line.iter().zip(&signal).map(|(l, s)| l - s).collect()
            }
        }
    }
}
