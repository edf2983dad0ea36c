//! Publication timing profiles.
//!
//! Date-only rows normalize to midnight, so an exact 00:00:00 timestamp is
//! indistinguishable from a missing clock time. Those land in `date_only`
//! and stay out of the hourly histogram; any other time counts toward its
//! hour, including real small-hours timestamps like 00:30.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::NewsRecord;

pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationTiming {
    /// All seven weekdays, Monday first.
    pub by_weekday: Vec<(String, usize)>,
    /// Ascending by date; only dates that appear.
    pub by_date: Vec<(NaiveDate, usize)>,
    /// Ascending by hour; only hours that appear, placeholder midnights excluded.
    pub by_hour: Vec<(u32, usize)>,
    /// Rows whose timestamp is exactly midnight.
    pub date_only: usize,
    /// Rows with no parseable timestamp at all.
    pub undated: usize,
}

impl PublicationTiming {
    pub fn busiest_date(&self) -> Option<(NaiveDate, usize)> {
        first_max(self.by_date.iter().map(|(d, n)| (*d, *n)))
    }

    pub fn busiest_hour(&self) -> Option<(u32, usize)> {
        first_max(self.by_hour.iter().map(|(h, n)| (*h, *n)))
    }
}

pub fn publication_timing(records: &[NewsRecord]) -> PublicationTiming {
    let mut weekdays = [0usize; 7];
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();
    let mut date_only = 0;
    let mut undated = 0;

    for rec in records {
        let dt = match rec.published {
            Some(dt) => dt,
            None => {
                undated += 1;
                continue;
            }
        };
        weekdays[dt.weekday().num_days_from_monday() as usize] += 1;
        *by_date.entry(dt.date()).or_insert(0) += 1;
        if dt.time() == NaiveTime::MIN {
            date_only += 1;
        } else {
            *by_hour.entry(dt.hour()).or_insert(0) += 1;
        }
    }

    PublicationTiming {
        by_weekday: WEEKDAY_LABELS
            .iter()
            .zip(weekdays)
            .map(|(label, n)| (label.to_string(), n))
            .collect(),
        by_date: by_date.into_iter().collect(),
        by_hour: by_hour.into_iter().collect(),
        date_only,
        undated,
    }
}

/// First maximum by count, so ties resolve to the earlier key.
fn first_max<K: Copy>(items: impl Iterator<Item = (K, usize)>) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in items {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best
}
