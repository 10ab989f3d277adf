//! Reporting and artifact export pipeline.

pub mod artifacts;
pub mod export;
pub mod reports;

pub use artifacts::{ArtifactManager, ArtifactPaths, BatchArtifactPaths};
pub use export::{export_batch_with_report, export_run_with_report};
