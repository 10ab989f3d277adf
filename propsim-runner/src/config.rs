//! Serializable run configuration, loaded from TOML.
//!
//! ```toml
//! [simulation]
//! initial_balance = 25000.0
//! max_drawdown = 0.08
//! win_rate = 0.5
//! risk_reward = 2.0
//! accounts = 5
//! profit_target = 0.12
//! max_trades = 1000000
//!
//! [run]
//! seed = 42
//!
//! [batch]
//! runs = 100
//!
//! [output]
//! dir = "results"
//! ```
//!
//! Every table and field is optional; omitted values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use propsim_core::{ParamError, SimulationParameters};

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render TOML: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid simulation parameters: {0}")]
    Params(#[from] ParamError),
    #[error("batch must contain at least one run")]
    EmptyBatch,
}

/// Complete, reproducible description of a run or batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub simulation: SimulationParameters,
    pub run: RunSection,
    pub batch: BatchSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunSection {
    /// Master seed. When absent a fresh seed is drawn and recorded in the result.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchSection {
    /// Number of independent simulations in a batch.
    pub runs: usize,
    /// Worker threads for the batch. `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            runs: 100,
            threads: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
    /// Also write the Markdown report.
    pub markdown: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            markdown: true,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        if self.batch.runs == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        Ok(())
    }

    /// Deterministic hash of the simulation parameters and seed.
    ///
    /// Output settings are excluded: the same simulation written to a
    /// different directory is the same run.
    pub fn run_id(&self) -> RunId {
        let canonical = serde_json::to_vec(&(&self.simulation, self.run.seed)).unwrap_or_default();
        blake3::hash(&canonical).to_hex()[..16].to_string()
    }
}
