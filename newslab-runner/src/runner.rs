//! Analysis runner — wires loaders, scoring, per-ticker pipelines, and text
//! models into one report.
//!
//! The shared expensive work happens exactly once: the news feed is read a
//! single time and every headline is scored a single time. Per-ticker
//! alignment, statistics and indicators then fan out across a rayon pool
//! over the shared read-only slices.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use newslab_core::data::{
    canonical_ticker, load_news_csv, load_prices_csv, LoadError, NewsLoadOptions,
};
use newslab_core::domain::{AlignedRow, NewsRecord};
use newslab_core::indicators::{enrich, standard_panel};
use newslab_core::pipeline::{align, AlignOptions};
use newslab_core::sentiment::HeadlineScorer;
use newslab_core::stats::{
    correlation_matrix, headline_stats, publication_timing, publisher_stats, sentiment_extremes,
    summarize, CorrelationMatrix, HeadlineStats, PublicationTiming, PublisherStats,
    SentimentExtremes, SeriesSummary,
};
use newslab_core::text::{
    Entity, EntityExtractor, LdaError, LdaModel, LdaOptions, LdaTopic, TfidfModel, TfidfOptions,
    Tokenizer,
};

use crate::config::{AnalysisConfig, ConfigError, TopicOptions};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Default schema version for serde deserialization of older JSON without
/// the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Headlines listed in the entity sample.
const ENTITY_SAMPLE_SIZE: usize = 10;

/// Rows in the most-frequent-headline table.
const TOP_HEADLINES: usize = 10;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("news data error: {0}")]
    Data(#[from] LoadError),
    #[error("no usable news records in {0}")]
    EmptyNews(String),
    #[error("topic model error: {0}")]
    Topics(#[from] LdaError),
}

/// Everything derived for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticker: String,
    pub article_count: usize,
    pub bar_count: usize,
    pub aligned: Vec<AlignedRow>,
    /// Distribution of this ticker's per-article scores.
    pub sentiment_summary: Option<SeriesSummary>,
    pub correlation: CorrelationMatrix,
    /// Latest defined value per indicator series, sorted by name.
    pub indicators: Vec<(String, Option<f64>)>,
    /// Anything that went wrong but did not abort the run.
    pub warnings: Vec<String>,
}

/// Full result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_at: String,
    pub config_hash: String,
    /// The config that produced this report, echoed for reruns.
    #[serde(default)]
    pub config: Option<AnalysisConfig>,
    /// BLAKE3 over every aligned row in ticker order.
    pub dataset_hash: String,
    pub news_rows_total: usize,
    pub news_rows_skipped: usize,
    pub headlines: HeadlineStats,
    pub publishers: PublisherStats,
    pub timing: PublicationTiming,
    pub extremes: SentimentExtremes,
    pub topics: Vec<LdaTopic>,
    pub entities: Vec<(String, Vec<Entity>)>,
    pub tickers: Vec<TickerReport>,
}

/// Run the whole analysis described by `config`.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport, RunError> {
    config.validate()?;

    let load_options = NewsLoadOptions {
        tickers: (!config.data.tickers.is_empty()).then(|| config.data.tickers.clone()),
    };
    let loaded = load_news_csv(&config.data.news_csv, &load_options)?;
    if loaded.records.is_empty() {
        return Err(RunError::EmptyNews(
            config.data.news_csv.display().to_string(),
        ));
    }

    // One scorer, one scoring pass over the corpus.
    let scorer = HeadlineScorer::new();
    let scored = scorer.score_records(&loaded.records);

    let headlines = headline_stats(&scored, TOP_HEADLINES);
    let publishers = publisher_stats(&scored, config.analysis.top_publishers);
    let timing = publication_timing(&scored);
    let extremes = sentiment_extremes(&scored, config.analysis.extreme_count);

    let topics = if config.topics.enabled {
        fit_topics(&scored, &config.topics)?
    } else {
        Vec::new()
    };

    let extractor = EntityExtractor::new();
    let entities = extractor.extract_sample(&scored, ENTITY_SAMPLE_SIZE);

    let tickers = ticker_universe(config, &scored);
    let reports: Vec<TickerReport> = tickers
        .par_iter()
        .map(|ticker| run_ticker(ticker, &scored, config))
        .collect();

    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        config_hash: config.config_hash(),
        config: Some(config.clone()),
        dataset_hash: compute_dataset_hash(&reports),
        news_rows_total: loaded.rows_total,
        news_rows_skipped: loaded.rows_skipped,
        headlines,
        publishers,
        timing,
        extremes,
        topics,
        entities,
        tickers: reports,
    })
}

/// Configured tickers, or every ticker present in the feed, canonical and
/// sorted.
fn ticker_universe(config: &AnalysisConfig, records: &[NewsRecord]) -> Vec<String> {
    let set: BTreeSet<String> = if config.data.tickers.is_empty() {
        records.iter().map(|r| r.stock.clone()).collect()
    } else {
        config
            .data
            .tickers
            .iter()
            .map(|t| canonical_ticker(t))
            .collect()
    };
    set.into_iter().collect()
}

/// Per-ticker pipeline. Missing or broken price data degrades to a warning
/// plus empty derived tables; it never fails the run.
fn run_ticker(ticker: &str, scored: &[NewsRecord], config: &AnalysisConfig) -> TickerReport {
    let mut warnings = Vec::new();
    let records: Vec<NewsRecord> = scored
        .iter()
        .filter(|r| r.stock == ticker)
        .cloned()
        .collect();

    let price_path = config.data.prices_dir.join(format!("{ticker}.csv"));
    let bars = match load_prices_csv(&price_path) {
        Ok(loaded) => {
            if loaded.rows_skipped > 0 {
                warnings.push(format!(
                    "{} of {} price rows for {ticker} were unreadable and skipped",
                    loaded.rows_skipped, loaded.rows_total
                ));
            }
            loaded.bars
        }
        Err(err) => {
            warnings.push(format!("price data unavailable for {ticker}: {err}"));
            Vec::new()
        }
    };
    let insane = bars
        .iter()
        .filter(|b| b.is_complete() && !b.is_sane())
        .count();
    if insane > 0 {
        warnings.push(format!(
            "{insane} price bars for {ticker} have inconsistent OHLC ranges"
        ));
    }

    let aligned = align(
        &records,
        &bars,
        &AlignOptions {
            volatility_window: config.analysis.volatility_window,
        },
    );
    if !records.is_empty() && !bars.is_empty() && aligned.is_empty() {
        warnings.push(format!(
            "news and prices for {ticker} share no dates; correlations are undefined"
        ));
    }

    let correlation = correlation_matrix(&aligned);

    let scores: Vec<f64> = records.iter().filter_map(|r| r.sentiment).collect();
    let sentiment_summary = summarize(&scores);

    let table = enrich(&bars, &standard_panel(config.analysis.atr_period));
    let indicators = table
        .names()
        .into_iter()
        .map(|name| (name.to_string(), table.last_value(name)))
        .collect();

    TickerReport {
        schema_version: SCHEMA_VERSION,
        ticker: ticker.to_string(),
        article_count: records.len(),
        bar_count: bars.len(),
        aligned,
        sentiment_summary,
        correlation,
        indicators,
        warnings,
    }
}

/// Tokenize the corpus and fit LDA on raw counts. A corpus that tokenizes
/// to nothing yields no topics rather than an error.
fn fit_topics(records: &[NewsRecord], options: &TopicOptions) -> Result<Vec<LdaTopic>, LdaError> {
    let tokenizer = Tokenizer::new();
    let docs: Vec<Vec<String>> = records
        .iter()
        .map(|r| tokenizer.tokenize(&r.headline))
        .collect();

    let tfidf_options = TfidfOptions {
        max_features: options.max_features,
        ..TfidfOptions::default()
    };
    let model = TfidfModel::fit(&docs, &tfidf_options);
    if model.is_empty() {
        return Ok(Vec::new());
    }

    let counts = model.counts(&docs);
    let lda_options = LdaOptions {
        topics: options.count,
        iterations: options.iterations,
        seed: options.seed,
        ..LdaOptions::default()
    };
    match LdaModel::fit(&counts, model.terms(), &lda_options) {
        Ok(lda) => Ok(lda.topics(options.top_words)),
        Err(LdaError::EmptyCorpus) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

/// Deterministic BLAKE3 hash over the aligned tables.
///
/// Reports arrive sorted by ticker, so the hash is stable across runs and
/// thread schedules.
fn compute_dataset_hash(reports: &[TickerReport]) -> String {
    let mut hasher = blake3::Hasher::new();
    for report in reports {
        hasher.update(report.ticker.as_bytes());
        for row in &report.aligned {
            hasher.update(row.date.to_string().as_bytes());
            hasher.update(&row.mean_sentiment.to_le_bytes());
            hasher.update(&(row.article_count as u64).to_le_bytes());
            hasher.update(&row.close.to_le_bytes());
            hasher.update(&row.adj_close.to_le_bytes());
            hasher.update(&row.volume.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use newslab_core::domain::PriceBar;

    fn record(ticker: &str, day: u32, score: f64) -> NewsRecord {
        NewsRecord {
            headline: format!("{ticker} headline"),
            url: String::new(),
            publisher: "wire".into(),
            published: NaiveDate::from_ymd_opt(2020, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            stock: ticker.into(),
            sentiment: Some(score),
        }
    }

    #[test]
    fn ticker_universe_discovers_from_feed_when_unconfigured() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("TSLA", 2, 0.1),
            record("AAPL", 2, 0.1),
            record("TSLA", 3, 0.2),
        ];
        assert_eq!(ticker_universe(&config, &records), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn ticker_universe_canonicalizes_configured_names() {
        let mut config = AnalysisConfig::default();
        config.data.tickers = vec!["fb".into(), "msf".into(), "FB".into()];
        assert_eq!(ticker_universe(&config, &[]), vec!["META", "MSFT"]);
    }

    #[test]
    fn missing_price_file_degrades_to_warning() {
        let mut config = AnalysisConfig::default();
        config.data.prices_dir = std::env::temp_dir().join("newslab_missing_prices");
        let scored = vec![record("AAPL", 2, 0.4)];

        let report = run_ticker("AAPL", &scored, &config);
        assert_eq!(report.article_count, 1);
        assert_eq!(report.bar_count, 0);
        assert!(report.aligned.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("price data unavailable"));
        // Correlations over an empty table are undefined, not zero.
        assert_eq!(report.correlation.cell(0, 1), None);
    }

    #[test]
    fn dataset_hash_ignores_nothing_it_sees() {
        let row = AlignedRow {
            date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            mean_sentiment: 0.2,
            article_count: 2,
            sentiment_class: newslab_core::domain::SentimentClass::Positive,
            open: 99.0,
            high: 101.0,
            low: 98.0,
            close: 100.0,
            adj_close: 100.0,
            volume: 1_000_000.0,
            daily_return: None,
            volatility: None,
        };
        let base = TickerReport {
            schema_version: SCHEMA_VERSION,
            ticker: "AAPL".into(),
            article_count: 2,
            bar_count: 1,
            aligned: vec![row.clone()],
            sentiment_summary: None,
            correlation: correlation_matrix(&[]),
            indicators: Vec::new(),
            warnings: Vec::new(),
        };

        let mut changed = base.clone();
        changed.aligned[0].adj_close = 101.0;

        assert_eq!(
            compute_dataset_hash(&[base.clone()]),
            compute_dataset_hash(&[base.clone()])
        );
        assert_ne!(
            compute_dataset_hash(&[base]),
            compute_dataset_hash(&[changed])
        );
    }

    #[test]
    fn inconsistent_ohlc_rows_produce_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("AAPL.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2020-01-02,100.0,95.0,99.0,104.0,103.5,1200000\n\
             2020-01-03,104.0,106.0,103.0,105.0,104.5,1100000\n",
        )
        .unwrap();
        let mut config = AnalysisConfig::default();
        config.data.prices_dir = dir.path().to_path_buf();

        let report = run_ticker("AAPL", &[record("AAPL", 2, 0.1)], &config);
        assert_eq!(report.bar_count, 2);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("inconsistent OHLC")));
    }

    #[test]
    fn topics_on_empty_tokenized_corpus_are_empty_not_an_error() {
        let records = vec![record("AAPL", 2, 0.1)];
        // Headlines like "AAPL headline" tokenize, so force emptiness with
        // stop-word-only text.
        let blank: Vec<NewsRecord> = records
            .into_iter()
            .map(|mut r| {
                r.headline = "the and of".into();
                r
            })
            .collect();
        let topics = fit_topics(&blank, &TopicOptions::default()).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn topics_are_deterministic_for_a_seed() {
        let records: Vec<NewsRecord> = (0..12)
            .map(|i| {
                let mut r = record("AAPL", 2 + (i % 3), 0.0);
                r.headline = if i % 2 == 0 {
                    "stock market trading surge".into()
                } else {
                    "quarterly earnings report growth".into()
                };
                r
            })
            .collect();
        let options = TopicOptions {
            count: 2,
            iterations: 30,
            ..TopicOptions::default()
        };
        let a = fit_topics(&records, &options).unwrap();
        let b = fit_topics(&records, &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
