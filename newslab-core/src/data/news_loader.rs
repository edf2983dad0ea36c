//! News CSV loader.
//!
//! One loader serves both header conventions through [`HeaderMap`]. Rows
//! missing a headline are skipped and counted; rows whose date never parses
//! are kept with `published = None` so they still feed headline and
//! publisher statistics.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::data::dates::normalize_timestamp;
use crate::data::headers::HeaderMap;
use crate::data::LoadError;
use crate::domain::NewsRecord;

/// Ticker renames applied on load. The raw feed predates Facebook's rename
/// and truncates Microsoft's symbol.
const TICKER_ALIASES: &[(&str, &str)] = &[("FB", "META"), ("MSF", "MSFT")];

/// Uppercases, trims and applies the alias table.
pub fn canonical_ticker(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    for (from, to) in TICKER_ALIASES {
        if upper == *from {
            return (*to).to_string();
        }
    }
    upper
}

#[derive(Debug, Clone, Default)]
pub struct NewsLoadOptions {
    /// Keep only records whose canonical ticker is listed. `None` keeps all.
    pub tickers: Option<Vec<String>>,
}

/// Loaded records plus row accounting for the run report.
#[derive(Debug, Clone)]
pub struct LoadedNews {
    pub records: Vec<NewsRecord>,
    /// Data rows seen, including filtered and skipped ones.
    pub rows_total: usize,
    /// Rows dropped for being unreadable or missing a headline.
    pub rows_skipped: usize,
}

pub fn load_news_csv(path: &Path, options: &NewsLoadOptions) -> Result<LoadedNews, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_news_from_reader(BufReader::new(file), options)
}

pub fn load_news_from_reader<R: Read>(
    reader: R,
    options: &NewsLoadOptions,
) -> Result<LoadedNews, LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = HeaderMap::from_record(rdr.headers()?);
    for column in ["headline", "date", "stock"] {
        if !headers.contains(column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let wanted: Option<Vec<String>> = options
        .tickers
        .as_ref()
        .map(|ts| ts.iter().map(|t| canonical_ticker(t)).collect());

    let mut records = Vec::new();
    let mut rows_total = 0;
    let mut rows_skipped = 0;
    for row in rdr.records() {
        rows_total += 1;
        let row = match row {
            Ok(r) => r,
            Err(_) => {
                rows_skipped += 1;
                continue;
            }
        };
        let headline = match headers.field(&row, "headline") {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => {
                rows_skipped += 1;
                continue;
            }
        };
        let stock = headers
            .field(&row, "stock")
            .map(canonical_ticker)
            .unwrap_or_default();
        if let Some(wanted) = &wanted {
            if !wanted.iter().any(|t| t == &stock) {
                continue;
            }
        }
        let published = headers.field(&row, "date").and_then(normalize_timestamp);
        records.push(NewsRecord {
            headline,
            url: headers.field(&row, "url").unwrap_or_default().to_string(),
            publisher: headers
                .field(&row, "publisher")
                .unwrap_or_default()
                .to_string(),
            published,
            stock,
            sentiment: None,
        });
    }

    Ok(LoadedNews {
        records,
        rows_total,
        rows_skipped,
    })
}
