//! Engine configuration.
//!
//! Every knob has a default, so an empty TOML file (or no file at all) gives
//! the stock behavior. The provider API key is not part of this file; it is
//! handed to the provider client separately.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad search terms used to build the category-search candidate pool.
///
/// They only need to surface lots of diverse movies; the genre itself is
/// matched after resolution.
pub const DEFAULT_SEED_VOCABULARY: [&str; 7] = ["the", "a", "love", "man", "girl", "night", "day"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Results returned by category search when the caller gives no limit
    pub category_limit: usize,
    /// Results kept per axis in relation search
    pub related_limit: usize,
    /// Search pages examined per query term
    pub max_pages_per_term: u32,
    /// Provider lookups in flight at once, per collector
    pub concurrency: usize,
    /// Deadline for every single provider call
    pub call_timeout_ms: u64,
    /// Stop collecting an axis as soon as `limit` movies were accepted
    pub stop_at_limit: bool,
    /// Run the three relation axes at the same time
    pub parallel_axes: bool,
    /// Optional rating floor applied on top of "has a rating"
    pub min_score: Option<f64>,
    pub seed_vocabulary: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            category_limit: 15,
            related_limit: 5,
            max_pages_per_term: 1,
            concurrency: 8,
            call_timeout_ms: 10_000,
            stop_at_limit: false,
            parallel_axes: false,
            min_score: None,
            seed_vocabulary: DEFAULT_SEED_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, value) in [
            ("category_limit", self.category_limit),
            ("related_limit", self.related_limit),
            ("concurrency", self.concurrency),
            ("max_pages_per_term", self.max_pages_per_term as usize),
            ("call_timeout_ms", self.call_timeout_ms as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{label} must be greater than zero.")));
            }
        }
        if self.seed_vocabulary.iter().all(|term| term.trim().is_empty()) {
            return Err(ConfigError::Invalid("seed_vocabulary must contain at least one term.".into()));
        }
        if let Some(min) = self.min_score {
            if !min.is_finite() {
                return Err(ConfigError::Invalid("min_score must be a finite number.".into()));
            }
        }
        Ok(())
    }
}

/// Load and validate a config file
pub fn load(path: &Path) -> Result<EngineConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    EngineConfig::from_toml(&raw)
}
