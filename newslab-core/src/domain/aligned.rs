//! AlignedRow — one calendar day where news and prices meet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Width of the neutral band around zero when bucketing mean sentiment.
pub const SENTIMENT_EPSILON: f64 = 1e-5;

/// Categorical bucket for a day's mean sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentClass {
    Negative,
    Neutral,
    Positive,
}

impl SentimentClass {
    /// Buckets a mean score. The neutral band is closed on both ends:
    /// scores within `[-SENTIMENT_EPSILON, SENTIMENT_EPSILON]` are Neutral.
    pub fn from_score(score: f64) -> Self {
        if score < -SENTIMENT_EPSILON {
            SentimentClass::Negative
        } else if score > SENTIMENT_EPSILON {
            SentimentClass::Positive
        } else {
            SentimentClass::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentClass::Negative => "negative",
            SentimentClass::Neutral => "neutral",
            SentimentClass::Positive => "positive",
        }
    }
}

/// One joined day: daily sentiment aggregate plus the full price row and
/// the features derived from it.
///
/// `daily_return` is computed over the joined sequence, so its first row is
/// always `None`. `volatility` is derived on the filtered price table before
/// the join and carried through, so early joined rows may or may not have a
/// value depending on where they fall in the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub mean_sentiment: f64,
    pub article_count: usize,
    pub sentiment_class: SentimentClass,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
    pub daily_return: Option<f64>,
    pub volatility: Option<f64>,
}
