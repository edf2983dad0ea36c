//! Daily sentiment aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::NewsRecord;

/// One calendar day's sentiment aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub mean_sentiment: f64,
    pub article_count: usize,
}

/// Groups scored records by calendar day and averages their scores.
///
/// Records without a date key or without a finite score are left out before
/// grouping, so `article_count` only counts contributing records. Output is
/// ascending by date; empty input produces an empty table.
pub fn aggregate_daily(records: &[NewsRecord]) -> Vec<DailySentiment> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for rec in records {
        let date = match rec.date_key() {
            Some(d) => d,
            None => continue,
        };
        let score = match rec.sentiment {
            Some(s) if s.is_finite() => s,
            _ => continue,
        };
        let entry = buckets.entry(date).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| DailySentiment {
            date,
            mean_sentiment: sum / count as f64,
            article_count: count,
        })
        .collect()
}
