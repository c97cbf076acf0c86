//! Engine settings.
//!
//! Stored as an optional JSON file on disk; every field has a default:
//! ```json
//! {
//!   "excluded_keys": ["name", "lat", "lng", "score"],
//!   "value_ordering": "lexicographic",
//!   "alignment": "positional",
//!   "ranking": "first_occurrence"
//! }
//! ```

use crate::analyzers::aggregate::Alignment;
use crate::analyzers::ranking::RankingStrategy;
use crate::analyzers::summary::ValueOrdering;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Env var naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "INDICATOR_CONFIG";

fn default_excluded_keys() -> Vec<String> {
    ["name", "lat", "lng", "score"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fields that identify or locate a city rather than measure it.
    pub excluded_keys: Vec<String>,
    pub value_ordering: ValueOrdering,
    pub alignment: Alignment,
    pub ranking: RankingStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            excluded_keys: default_excluded_keys(),
            value_ordering: ValueOrdering::default(),
            alignment: Alignment::default(),
            ranking: RankingStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{path}'"))?;
        serde_json::from_str(&content).with_context(|| format!("invalid config '{path}'"))
    }

    /// Loads from `path`, falling back to [`CONFIG_ENV`], then to defaults.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path.map(str::to_string).or_else(|| std::env::var(CONFIG_ENV).ok()) {
            Some(p) => Self::load(&p),
            None => Ok(Self::default()),
        }
    }
}
