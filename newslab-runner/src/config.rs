//! Serializable analysis configuration.
//!
//! Loaded from TOML. Every section and field has a default, so a partial
//! file (or none at all) still yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub data: DataConfig,
    pub analysis: AnalysisOptions,
    pub topics: TopicOptions,
    pub output: OutputConfig,
}

/// Input locations and the ticker universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Analyst headline feed.
    pub news_csv: PathBuf,
    /// Directory holding one `{TICKER}.csv` price history per symbol.
    pub prices_dir: PathBuf,
    /// Tickers to analyze. Empty means every ticker found in the news feed.
    pub tickers: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            news_csv: PathBuf::from("data/news.csv"),
            prices_dir: PathBuf::from("data/prices"),
            tickers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Rolling window for the volatility column.
    pub volatility_window: usize,
    /// ATR period for the indicator panel.
    pub atr_period: usize,
    /// Publishers listed in the activity table.
    pub top_publishers: usize,
    /// Headlines listed per sentiment extreme.
    pub extreme_count: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            volatility_window: 10,
            atr_period: 10,
            top_publishers: 10,
            extreme_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicOptions {
    pub enabled: bool,
    pub count: usize,
    pub iterations: usize,
    pub seed: u64,
    pub max_features: usize,
    pub top_words: usize,
}

impl Default for TopicOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 10,
            iterations: 200,
            seed: 42,
            max_features: 1000,
            top_words: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where artifact directories are created.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.volatility_window < 2 {
            return Err(ConfigError::Invalid(
                "analysis.volatility_window must be at least 2".into(),
            ));
        }
        if self.analysis.atr_period == 0 {
            return Err(ConfigError::Invalid(
                "analysis.atr_period must be at least 1".into(),
            ));
        }
        if self.topics.enabled {
            if self.topics.count == 0 {
                return Err(ConfigError::Invalid(
                    "topics.count must be at least 1".into(),
                ));
            }
            if self.topics.iterations == 0 {
                return Err(ConfigError::Invalid(
                    "topics.iterations must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs hash identically, which makes artifact
    /// directories comparable across machines.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("AnalysisConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
