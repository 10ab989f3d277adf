//! Batch mode: many independent simulations of one parameter set.
//!
//! Runs fan out across a rayon pool. Each run gets its own seed derived from
//! the master seed and the run index, so results do not depend on scheduling
//! or thread count. Accounts inside one run remain strictly sequential.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use propsim_core::{run_simulation, ParamError, RunStatus, SeedHierarchy, SimulationParameters};

use crate::config::{ConfigError, RunConfig, RunId};
use crate::runner::{resolve_seed, SCHEMA_VERSION};

/// Errors from batch execution.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch must contain at least one run")]
    EmptyBatch,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("run {index} failed: {source}")]
    Run {
        index: usize,
        #[source]
        source: ParamError,
    },
}

/// Raw outputs of one run in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRun {
    pub index: usize,
    pub seed: u64,
    pub status: RunStatus,
    pub total_trades: u64,
    /// Trades per account, in account order.
    pub account_trades: Vec<u64>,
    pub final_balances: Vec<f64>,
}

/// Distribution of total trades over converged runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeCountStats {
    pub min: u64,
    pub median: f64,
    pub max: u64,
}

impl TradeCountStats {
    /// `None` for an empty sample.
    pub fn from_counts(counts: &[u64]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        let mut sorted = counts.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
        };
        Some(Self {
            min: sorted[0],
            median,
            max: sorted[n - 1],
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub master_seed: u64,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub params: SimulationParameters,
    pub runs: Vec<BatchRun>,
    pub converged: usize,
    pub non_converged: usize,
    /// Over converged runs only. `None` when no run converged.
    pub total_trades: Option<TradeCountStats>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run `runs` independent simulations of `config.simulation`.
///
/// Uses `config.batch.threads` workers when set, otherwise the global rayon
/// pool. Per-run results are returned in index order.
pub fn run_batch(config: &RunConfig, runs: usize) -> Result<BatchResult, BatchError> {
    if runs == 0 {
        return Err(BatchError::EmptyBatch);
    }
    config.validate()?;

    let master_seed = resolve_seed(config);
    let mut resolved = config.clone();
    resolved.run.seed = Some(master_seed);
    let run_id = resolved.run_id();
    let seeds = SeedHierarchy::new(master_seed);
    let params = &config.simulation;

    info!(%run_id, master_seed, runs, "starting batch");

    let timestamp = Utc::now();
    let started = Instant::now();

    let execute = || -> Result<Vec<BatchRun>, BatchError> {
        (0..runs)
            .into_par_iter()
            .map(|index| {
                let seed = seeds.sub_seed(index as u64);
                let result = run_simulation(params, &mut seeds.outcomes_for(index as u64))
                    .map_err(|source| BatchError::Run { index, source })?;
                Ok(BatchRun {
                    index,
                    seed,
                    status: result.status,
                    total_trades: result.total_trades,
                    account_trades: result.accounts.iter().map(|a| a.trades).collect(),
                    final_balances: result.final_balances(),
                })
            })
            .collect()
    };

    let per_run = match config.batch.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(execute)?,
        None => execute()?,
    };

    let converged_counts: Vec<u64> = per_run
        .iter()
        .filter(|r| r.status.is_converged())
        .map(|r| r.total_trades)
        .collect();
    let converged = converged_counts.len();
    let non_converged = per_run.len() - converged;

    if non_converged > 0 {
        warn!(non_converged, runs, "some runs exhausted their trade budget");
    }
    info!(converged, runs, "batch finished");

    Ok(BatchResult {
        schema_version: SCHEMA_VERSION,
        run_id,
        master_seed,
        timestamp,
        duration_secs: started.elapsed().as_secs_f64(),
        params: params.clone(),
        runs: per_run,
        converged,
        non_converged,
        total_trades: TradeCountStats::from_counts(&converged_counts),
    })
}
