//! Domain types: price bars, news records, and the aligned join row.

pub mod aligned;
pub mod bar;
pub mod news;

pub use aligned::{AlignedRow, SentimentClass, SENTIMENT_EPSILON};
pub use bar::PriceBar;
pub use news::NewsRecord;
