//! Historical price CSV loader.
//!
//! Numeric holes become NaN rather than dropped rows; completeness filtering
//! belongs to `pipeline::derive`, not the loader. Rows without a parseable
//! date are unusable (the date is the join key) and are skipped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::data::dates::normalize_date;
use crate::data::headers::HeaderMap;
use crate::data::LoadError;
use crate::domain::PriceBar;

const REQUIRED_COLUMNS: &[&str] = &["date", "open", "high", "low", "close", "adj close", "volume"];

/// Loaded bars, sorted ascending by date, plus row accounting.
#[derive(Debug, Clone)]
pub struct LoadedPrices {
    pub bars: Vec<PriceBar>,
    pub rows_total: usize,
    pub rows_skipped: usize,
}

pub fn load_prices_csv(path: &Path) -> Result<LoadedPrices, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_prices_from_reader(BufReader::new(file))
}

pub fn load_prices_from_reader<R: Read>(reader: R) -> Result<LoadedPrices, LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = HeaderMap::from_record(rdr.headers()?);
    for column in REQUIRED_COLUMNS {
        if !headers.contains(column) {
            return Err(LoadError::MissingColumn((*column).to_string()));
        }
    }
    let has_dividends = headers.contains("dividends");
    let has_splits = headers.contains("stock splits");

    let mut bars = Vec::new();
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
        let date = match headers.field(&row, "date").and_then(normalize_date) {
            Some(d) => d,
            None => {
                rows_skipped += 1;
                continue;
            }
        };
        bars.push(PriceBar {
            date,
            open: parse_cell(headers.field(&row, "open")),
            high: parse_cell(headers.field(&row, "high")),
            low: parse_cell(headers.field(&row, "low")),
            close: parse_cell(headers.field(&row, "close")),
            adj_close: parse_cell(headers.field(&row, "adj close")),
            volume: parse_cell(headers.field(&row, "volume")),
            dividends: has_dividends.then(|| parse_cell(headers.field(&row, "dividends"))),
            stock_splits: has_splits.then(|| parse_cell(headers.field(&row, "stock splits"))),
        });
    }
    bars.sort_by_key(|b| b.date);

    Ok(LoadedPrices {
        bars,
        rows_total,
        rows_skipped,
    })
}

fn parse_cell(field: Option<&str>) -> f64 {
    match field {
        Some(s) if !s.is_empty() => s.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
