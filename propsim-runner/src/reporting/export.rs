//! Export orchestrator for artifacts and reports.

use anyhow::{Context, Result};
use std::path::Path;

use crate::batch::BatchResult;
use crate::reporting::artifacts::{ArtifactManager, ArtifactPaths, BatchArtifactPaths};
use crate::reporting::reports::MarkdownReportGenerator;
use crate::runner::SimulationRun;

pub fn export_run_with_report(
    output_dir: impl AsRef<Path>,
    run: &SimulationRun,
    include_report: bool,
) -> Result<ArtifactPaths> {
    let manager = ArtifactManager::new(output_dir)?;
    let mut paths = manager.save_run(run)?;

    if include_report {
        let report_path = paths
            .manifest
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("report.md");
        let report = MarkdownReportGenerator.generate(run);
        std::fs::write(&report_path, report)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        paths.report_markdown = Some(report_path);
    }

    Ok(paths)
}

pub fn export_batch_with_report(
    output_dir: impl AsRef<Path>,
    batch: &BatchResult,
    include_report: bool,
) -> Result<BatchArtifactPaths> {
    let manager = ArtifactManager::new(output_dir)?;
    let mut paths = manager.save_batch(batch)?;

    if include_report {
        let report_path = paths
            .batch_json
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("report.md");
        let report = MarkdownReportGenerator.generate_batch(batch);
        std::fs::write(&report_path, report)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        paths.report_markdown = Some(report_path);
    }

    Ok(paths)
}
