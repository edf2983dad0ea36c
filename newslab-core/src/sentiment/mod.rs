//! Sentiment scoring and daily aggregation.

pub mod aggregate;
pub mod scorer;

pub use aggregate::{aggregate_daily, DailySentiment};
pub use scorer::HeadlineScorer;
