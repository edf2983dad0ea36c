//! Descriptive statistics, correlation, and publication profiles.

pub mod correlation;
pub mod describe;
pub mod publishers;
pub mod timing;

pub use correlation::{
    correlation_matrix, pearson, sentiment_return_correlation, CorrelationMatrix, MATRIX_COLUMNS,
};
pub use describe::{
    headline_stats, sentiment_extremes, summarize, HeadlineStats, SentimentExtremes, SeriesSummary,
};
pub use publishers::{email_domain, publisher_stats, PublisherRow, PublisherStats};
pub use timing::{publication_timing, PublicationTiming, WEEKDAY_LABELS};
