//! Integration tests for the CSV → sentiment → alignment pipeline.

use chrono::NaiveDate;
use newslab_core::data::{load_news_from_reader, load_prices_from_reader, NewsLoadOptions};
use newslab_core::domain::{NewsRecord, SentimentClass};
use newslab_core::pipeline::{align, AlignOptions};
use newslab_core::sentiment::HeadlineScorer;

const NEWS_CSV: &str = "\
headline,url,publisher,date,stock
Record quarter lifts outlook,https://n.example/1,Reuters,2020-06-01 09:15:00,AAPL
Supplier dispute clouds launch,https://n.example/2,Benzinga,2020-06-01 16:40:00,AAPL
Shareholder meeting scheduled,https://n.example/3,GuruFocus,2020-06-02 11:05:00,AAPL
Chip delay announced,https://n.example/4,Reuters,2020-06-04 10:00:00,AAPL
";

const PRICES_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2020-05-29,89.0,91.0,88.0,90.0,90.0,900000
2020-06-01,99.0,101.0,98.0,100.0,100.0,1000000
2020-06-02,109.0,111.0,108.0,110.0,110.0,1100000
2020-06-03,119.0,121.0,118.0,120.0,120.0,1200000
";

/// Deterministic stand-in for the VADER pass so value assertions stay exact.
fn with_sentiments(records: Vec<NewsRecord>, scores: &[(&str, f64)]) -> Vec<NewsRecord> {
    records
        .into_iter()
        .map(|mut r| {
            r.sentiment = scores
                .iter()
                .find(|(h, _)| *h == r.headline)
                .map(|(_, s)| *s);
            r
        })
        .collect()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, d).unwrap()
}

#[test]
fn csv_to_aligned_rows_end_to_end() {
    let news = load_news_from_reader(NEWS_CSV.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();
    assert_eq!(news.rows_skipped, 0);
    assert_eq!(prices.rows_skipped, 0);

    let scored = with_sentiments(
        news.records,
        &[
            ("Record quarter lifts outlook", 0.5),
            ("Supplier dispute clouds launch", -0.1),
            ("Shareholder meeting scheduled", 0.0),
            ("Chip delay announced", -0.5),
        ],
    );
    let rows = align(&scored, &prices.bars, &AlignOptions::default());

    // June 1st and 2nd have both news and prices. June 4th is news-only and
    // May 29th / June 3rd are price-only, so none of those appear.
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].date, day(1));
    assert!((rows[0].mean_sentiment - 0.2).abs() < 1e-12);
    assert_eq!(rows[0].article_count, 2);
    assert_eq!(rows[0].sentiment_class, SentimentClass::Positive);
    assert_eq!(rows[0].adj_close, 100.0);
    assert_eq!(rows[0].daily_return, None);

    assert_eq!(rows[1].date, day(2));
    assert_eq!(rows[1].mean_sentiment, 0.0);
    assert_eq!(rows[1].article_count, 1);
    assert_eq!(rows[1].sentiment_class, SentimentClass::Neutral);
    let ret = rows[1].daily_return.unwrap();
    assert!((ret - 0.10).abs() < 1e-12);

    // Four bars cannot fill the default 10-day volatility window.
    assert_eq!(rows[0].volatility, None);
    assert_eq!(rows[1].volatility, None);
}

#[test]
fn first_joined_day_return_is_undefined_not_zero() {
    let news = load_news_from_reader(NEWS_CSV.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();
    let scored = with_sentiments(
        news.records,
        &[
            ("Record quarter lifts outlook", 0.5),
            ("Supplier dispute clouds launch", -0.1),
            ("Shareholder meeting scheduled", 0.0),
            ("Chip delay announced", -0.5),
        ],
    );
    let rows = align(&scored, &prices.bars, &AlignOptions::default());
    assert_ne!(rows[0].daily_return, Some(0.0));
    assert_eq!(rows[0].daily_return, None);
}

#[test]
fn returns_bridge_price_rows_dropped_for_missing_fields() {
    // The middle bar has no adjusted close, so it is filtered out before
    // returns are derived and the June 3rd return spans two calendar days.
    let prices_csv = "\
Date,Open,High,Low,Close,Adj Close,Volume
2020-06-01,99.0,101.0,98.0,100.0,100.0,1000000
2020-06-02,109.0,111.0,108.0,110.0,,1100000
2020-06-03,119.0,121.0,118.0,120.0,120.0,1200000
";
    let news_csv = "\
headline,url,publisher,date,stock
a,u,p,2020-06-01 09:00:00,AAPL
b,u,p,2020-06-02 09:00:00,AAPL
c,u,p,2020-06-03 09:00:00,AAPL
";
    let news = load_news_from_reader(news_csv.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(prices_csv.as_bytes()).unwrap();
    let scored = with_sentiments(news.records, &[("a", 0.1), ("b", 0.2), ("c", 0.3)]);
    let rows = align(&scored, &prices.bars, &AlignOptions::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, day(1));
    assert_eq!(rows[1].date, day(3));
    let ret = rows[1].daily_return.unwrap();
    assert!((ret - 0.20).abs() < 1e-12);
}

#[test]
fn timezone_offsets_are_stripped_so_late_news_keeps_its_local_date() {
    // 23:30 New York time would be June 2nd in UTC. The wall-clock date wins.
    let news_csv = "\
headline,url,publisher,date,stock
evening wrap,u,p,2020-06-01 23:30:00-04:00,AAPL
";
    let news = load_news_from_reader(news_csv.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();
    let scored = with_sentiments(news.records, &[("evening wrap", 0.4)]);
    let rows = align(&scored, &prices.bars, &AlignOptions::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, day(1));
}

#[test]
fn epsilon_boundary_means_classify_neutral() {
    let news_csv = "\
headline,url,publisher,date,stock
tiny up,u,p,2020-06-01 09:00:00,AAPL
tiny down,u,p,2020-06-02 09:00:00,AAPL
";
    let news = load_news_from_reader(news_csv.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();
    let scored = with_sentiments(news.records, &[("tiny up", 1e-5), ("tiny down", -1e-5)]);
    let rows = align(&scored, &prices.bars, &AlignOptions::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sentiment_class, SentimentClass::Neutral);
    assert_eq!(rows[1].sentiment_class, SentimentClass::Neutral);
}

#[test]
fn aligning_twice_gives_identical_rows() {
    let news = load_news_from_reader(NEWS_CSV.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();
    let scored = with_sentiments(news.records, &[("Record quarter lifts outlook", 0.5)]);

    let first = align(&scored, &prices.bars, &AlignOptions::default());
    let second = align(&scored, &prices.bars, &AlignOptions::default());
    assert_eq!(first, second);
}

#[test]
fn vader_scored_days_classify_sensibly() {
    let news_csv = "\
headline,url,publisher,date,stock
Investors celebrate great profit growth and praise the rally,u,p,2020-06-01 09:00:00,AAPL
Fear and panic as terrible losses trigger a disaster,u,p,2020-06-02 09:00:00,AAPL
";
    let news = load_news_from_reader(news_csv.as_bytes(), &NewsLoadOptions::default()).unwrap();
    let prices = load_prices_from_reader(PRICES_CSV.as_bytes()).unwrap();

    let scorer = HeadlineScorer::new();
    let scored = scorer.score_records(&news.records);
    let rows = align(&scored, &prices.bars, &AlignOptions::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sentiment_class, SentimentClass::Positive);
    assert_eq!(rows[1].sentiment_class, SentimentClass::Negative);
}
