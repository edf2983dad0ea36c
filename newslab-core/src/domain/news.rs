//! NewsRecord — one analyst headline with its publication metadata.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single news row after loading.
///
/// `published` is the normalized wall-clock timestamp; `None` means the raw
/// date string was unparseable, which keeps the record available for headline
/// and publisher statistics while excluding it from any date-keyed join.
/// `sentiment` is filled by the scoring pass and stays `None` until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub headline: String,
    pub url: String,
    pub publisher: String,
    pub published: Option<NaiveDateTime>,
    pub stock: String,
    pub sentiment: Option<f64>,
}

impl NewsRecord {
    /// Calendar-day join key, or `None` when the timestamp never parsed.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.published.map(|dt| dt.date())
    }

    /// True when both the date key and a finite sentiment score are present.
    pub fn is_aggregatable(&self) -> bool {
        self.published.is_some() && self.sentiment.map(f64::is_finite).unwrap_or(false)
    }
}
