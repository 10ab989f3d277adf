//! Artifact manager for persisting run outputs.

mod manifest;
mod profit;
mod trades;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::batch::BatchResult;
use crate::metrics::padded_profit_series;
use crate::runner::SimulationRun;

pub use manifest::RunManifest;
pub use profit::write_cumulative_profit_csv;
pub use trades::write_trades_csv;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub result_json: PathBuf,
    pub trades_csv: PathBuf,
    pub cumulative_profit_csv: PathBuf,
    pub report_markdown: Option<PathBuf>,
}

/// Artifact paths for a batch.
#[derive(Debug, Clone)]
pub struct BatchArtifactPaths {
    pub batch_json: PathBuf,
    pub report_markdown: Option<PathBuf>,
}

/// Manages writing all artifacts for a run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save complete run artifacts under `<output_dir>/<run_id>/`.
    pub fn save_run(&self, run: &SimulationRun) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(&run.run_id);
        std::fs::create_dir_all(&run_dir)
            .context("Failed to create run artifact directory")?;

        let manifest_path = run_dir.join("manifest.json");
        manifest::write_manifest(&manifest_path, run)?;

        let result_json = run_dir.join("result.json");
        write_json(&result_json, run, "run result")?;

        let trades_csv = run_dir.join("trades.csv");
        trades::write_trades_csv(&trades_csv, &run.result.trades)?;

        let cumulative_profit_csv = run_dir.join("cumulative_profit.csv");
        profit::write_cumulative_profit_csv(
            &cumulative_profit_csv,
            &padded_profit_series(&run.result),
        )?;

        Ok(ArtifactPaths {
            manifest: manifest_path,
            result_json,
            trades_csv,
            cumulative_profit_csv,
            report_markdown: None,
        })
    }

    /// Save batch artifacts under `<output_dir>/batch-<run_id>/`.
    pub fn save_batch(&self, batch: &BatchResult) -> Result<BatchArtifactPaths> {
        let batch_dir = self.output_dir.join(format!("batch-{}", batch.run_id));
        std::fs::create_dir_all(&batch_dir)
            .context("Failed to create batch artifact directory")?;

        let batch_json = batch_dir.join("batch.json");
        write_json(&batch_json, batch, "batch result")?;

        Ok(BatchArtifactPaths {
            batch_json,
            report_markdown: None,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {what}"))?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {what} to {}", path.display()))?;
    Ok(())
}
