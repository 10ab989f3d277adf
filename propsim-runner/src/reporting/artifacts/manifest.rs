//! Run manifest export (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use propsim_core::{RunStatus, SimulationParameters};

use crate::runner::SimulationRun;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub run_id: String,
    pub seed: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub duration_secs: f64,
    pub status: RunStatus,
    pub total_trades: u64,
    pub params: SimulationParameters,
}

impl RunManifest {
    pub fn from_run(run: &SimulationRun) -> Self {
        Self {
            schema_version: run.schema_version,
            run_id: run.run_id.clone(),
            seed: run.seed,
            timestamp: run.timestamp,
            duration_secs: run.duration_secs,
            status: run.result.status,
            total_trades: run.result.total_trades,
            params: run.result.params.clone(),
        }
    }
}

pub fn write_manifest(path: &Path, run: &SimulationRun) -> Result<()> {
    let manifest = RunManifest::from_run(run);
    let json = serde_json::to_string_pretty(&manifest)
        .context("Failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
