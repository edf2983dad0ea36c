//! NewsLab Core — engine, domain types, loaders, sentiment, alignment, statistics.
//!
//! This crate contains the heart of the news/price analysis engine:
//! - Domain types (price bars, news records, aligned rows)
//! - CSV loaders tolerant of both dataset header conventions
//! - Timestamp normalization (offsets stripped, not converted)
//! - VADER sentiment scoring and per-day aggregation
//! - Price feature derivation (returns, rolling volatility) and the
//!   sentiment/price date join
//! - Descriptive statistics, publisher/timing breakdowns, correlations
//! - Technical indicators behind a common trait
//! - Headline text models (TF-IDF, LDA topics, entities)

pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod sentiment;
pub mod stats;
pub mod text;
