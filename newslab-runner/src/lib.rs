//! NewsLab Runner — analysis orchestration over `newslab-core`.
//!
//! This crate turns raw news and price files into finished reports:
//! - TOML-backed run configuration with validation and fingerprinting
//! - Corpus-wide scoring, publisher/timing profiles, topics, entities
//! - Parallel per-ticker alignment, correlation, and indicator snapshots
//! - JSON/CSV/Markdown export with schema-versioned artifacts

pub mod config;
pub mod export;
pub mod report;
pub mod runner;

pub use config::{
    AnalysisConfig, AnalysisOptions, ConfigError, DataConfig, OutputConfig, TopicOptions,
};
pub use export::{
    export_aligned_csv, export_correlations_csv, export_indicators_csv, export_json, import_json,
    load_artifacts, save_artifacts,
};
pub use report::{generate_markdown, print_summary};
pub use runner::{run_analysis, AnalysisReport, RunError, TickerReport, SCHEMA_VERSION};
