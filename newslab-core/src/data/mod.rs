//! Loading and normalization of raw CSV inputs.

pub mod dates;
pub mod headers;
pub mod news_loader;
pub mod price_loader;

pub use headers::HeaderMap;
pub use news_loader::{
    canonical_ticker, load_news_csv, load_news_from_reader, LoadedNews, NewsLoadOptions,
};
pub use price_loader::{load_prices_csv, load_prices_from_reader, LoadedPrices};

use thiserror::Error;

/// Errors surfaced while reading an input file.
///
/// Malformed rows are not errors; loaders skip and count them. An error here
/// means the file itself is unusable.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}
