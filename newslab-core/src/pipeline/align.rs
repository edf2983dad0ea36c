//! News/price alignment.
//!
//! The aligner joins the daily sentiment table with the filtered price
//! table on calendar date. Volatility is derived over the full filtered
//! price history before the join and carried through; the daily return is
//! recomputed over the joined sequence, so its first row is always `None`
//! and a return can span calendar gaps between joined days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{AlignedRow, NewsRecord, PriceBar, SentimentClass};
use crate::pipeline::derive::{daily_returns, derive};
use crate::sentiment::{aggregate_daily, DailySentiment};

#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// Rolling window for the pre-join volatility column.
    pub volatility_window: usize,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            volatility_window: 10,
        }
    }
}

/// Inner-joins scored news with prices by date.
///
/// Output rows are ascending by date. Either input being empty, or the two
/// simply never sharing a date, produces an empty table rather than an error.
pub fn align(news: &[NewsRecord], prices: &[PriceBar], options: &AlignOptions) -> Vec<AlignedRow> {
    let daily = aggregate_daily(news);
    let sentiment_by_date: BTreeMap<NaiveDate, &DailySentiment> =
        daily.iter().map(|d| (d.date, d)).collect();

    let derived = derive(prices, options.volatility_window);

    // Bars are ascending, so the joined rows come out ascending too.
    let mut rows = Vec::new();
    for (i, bar) in derived.bars.iter().enumerate() {
        let sentiment = match sentiment_by_date.get(&bar.date) {
            Some(s) => s,
            None => continue,
        };
        rows.push(AlignedRow {
            date: bar.date,
            mean_sentiment: sentiment.mean_sentiment,
            article_count: sentiment.article_count,
            sentiment_class: SentimentClass::from_score(sentiment.mean_sentiment),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            adj_close: bar.adj_close,
            volume: bar.volume,
            daily_return: None,
            volatility: derived.volatility[i],
        });
    }

    let adj: Vec<f64> = rows.iter().map(|r| r.adj_close).collect();
    for (row, ret) in rows.iter_mut().zip(daily_returns(&adj)) {
        row.daily_return = ret;
    }
    rows
}
