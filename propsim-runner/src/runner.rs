//! Single-run runner: wires configuration, seeding and the engine together.
//!
//! Two entry points:
//! - `run_single()`: resolves the seed from a `RunConfig` and records run metadata. Used by CLI.
//! - `run_with_seed()`: bare parameters plus an explicit seed. Used by batch mode.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use propsim_core::{run_simulation, ParamError, RandomOutcomes, SimulationParameters, SimulationResult};

use crate::config::{ConfigError, RunConfig, RunId};
use crate::metrics::RunSummary;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid simulation parameters: {0}")]
    Params(#[from] ParamError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// A finished run together with everything needed to reproduce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    /// Seed actually used, even when none was configured.
    pub seed: u64,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub result: SimulationResult,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SimulationRun {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_result(&self.result)
    }
}

/// Seed from the config, or a fresh one from the thread RNG.
pub fn resolve_seed(config: &RunConfig) -> u64 {
    config.run.seed.unwrap_or_else(rand::random)
}

/// Run one simulation with an explicit seed.
pub fn run_with_seed(
    params: &SimulationParameters,
    seed: u64,
) -> Result<SimulationResult, ParamError> {
    let mut source = RandomOutcomes::seeded(seed);
    run_simulation(params, &mut source)
}

/// Run a single simulation from a `RunConfig`.
///
/// The run id is derived after seed resolution, so an unseeded config gets
/// an id matching the seed it actually ran with.
pub fn run_single(config: &RunConfig) -> Result<SimulationRun, RunError> {
    config.validate()?;

    let seed = resolve_seed(config);
    let mut resolved = config.clone();
    resolved.run.seed = Some(seed);
    let run_id = resolved.run_id();

    debug!(%run_id, seed, accounts = config.simulation.accounts, "starting simulation run");

    let timestamp = Utc::now();
    let started = Instant::now();
    let result = run_with_seed(&config.simulation, seed)?;
    let duration_secs = started.elapsed().as_secs_f64();

    Ok(SimulationRun {
        schema_version: SCHEMA_VERSION,
        run_id,
        seed,
        timestamp,
        duration_secs,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_config_is_reproducible() {
        let mut config = RunConfig::default();
        config.run.seed = Some(42);

        let a = run_single(&config).unwrap();
        let b = run_single(&config).unwrap();
        assert_eq!(a.seed, 42);
        assert_eq!(a.run_id, b.run_id);
        assert_eq!(a.result.trades, b.result.trades);
        assert_eq!(a.result.status, b.result.status);
    }

    #[test]
    fn unseeded_config_records_the_drawn_seed() {
        let config = RunConfig::default();
        let run = run_single(&config).unwrap();

        let replay = run_with_seed(&config.simulation, run.seed).unwrap();
        assert_eq!(replay.trades, run.result.trades);

        let mut pinned = config.clone();
        pinned.run.seed = Some(run.seed);
        assert_eq!(pinned.run_id(), run.run_id);
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let mut config = RunConfig::default();
        config.simulation.win_rate = 1.5;
        let err = run_single(&config).unwrap_err();
        assert!(matches!(
            err,
            RunError::Config(ConfigError::Params(ParamError::FractionOutOfRange { .. }))
        ));
    }

    #[test]
    fn run_serializes_with_schema_version() {
        let mut config = RunConfig::default();
        config.run.seed = Some(3);
        config.simulation.accounts = 2;
        let run = run_single(&config).unwrap();

        let json = serde_json::to_string(&run).unwrap();
        let back: SimulationRun = serde_json::from_str(&json).unwrap();
        assert_eq!(back.schema_version, SCHEMA_VERSION);
        assert_eq!(back.seed, 3);
        assert_eq!(back.result.total_trades, run.result.total_trades);
    }
}
