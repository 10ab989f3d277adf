//! Propsim Runner — configuration, run orchestration, batch mode, reporting.
//!
//! This crate builds on `propsim-core` to provide:
//! - TOML run configuration with content-addressed run ids
//! - Single-run runner with seed resolution and run metadata
//! - Parallel batch mode with per-run derived seeds
//! - Per-account summary metrics
//! - Artifact export (trade CSV, cumulative-profit CSV, JSON, Markdown)

pub mod batch;
pub mod config;
pub mod metrics;
pub mod reporting;
pub mod runner;

pub use batch::{run_batch, BatchError, BatchResult, BatchRun, TradeCountStats};
pub use config::{ConfigError, RunConfig, RunId};
pub use metrics::{padded_profit_series, AccountSummary, RunSummary};
pub use runner::{resolve_seed, run_single, run_with_seed, RunError, SimulationRun, SCHEMA_VERSION};
