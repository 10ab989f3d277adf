//! Propsim CLI — run simulations, batches, and write starter configs.
//!
//! Commands:
//! - `run` — one simulation from a TOML config and/or flags; prints the per-account table
//! - `batch` — many seeded simulations in parallel; prints trade-count statistics
//! - `init-config` — write the default configuration as TOML

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use propsim_core::RunStatus;
use propsim_runner::reporting::reports::render_summary_table;
use propsim_runner::reporting::{export_batch_with_report, export_run_with_report};
use propsim_runner::{run_batch, run_single, RunConfig};

#[derive(Parser)]
#[command(
    name = "propsim",
    about = "Propsim CLI — multi-account trading simulation under an adaptive risk policy"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation.
    Run {
        #[command(flatten)]
        sim: SimArgs,

        /// Print the full trade log.
        #[arg(long, default_value_t = false)]
        trades: bool,

        /// Print the run summary as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run many independent simulations with derived seeds.
    Batch {
        #[command(flatten)]
        sim: SimArgs,

        /// Number of runs. Overrides [batch] runs.
        #[arg(long)]
        runs: Option<usize>,

        /// Worker threads. Overrides [batch] threads.
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Write the default configuration as TOML.
    InitConfig {
        /// Destination file.
        #[arg(default_value = "propsim.toml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Config file plus per-field overrides shared by `run` and `batch`.
#[derive(Args)]
struct SimArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting balance of every account.
    #[arg(long)]
    balance: Option<f64>,

    /// Drawdown limit as a fraction of the initial balance (e.g. 0.08).
    #[arg(long)]
    drawdown: Option<f64>,

    /// Win probability per trade, 0..=1.
    #[arg(long)]
    win_rate: Option<f64>,

    /// Reward multiple of the amount risked.
    #[arg(long)]
    risk_reward: Option<f64>,

    /// Number of accounts.
    #[arg(long)]
    accounts: Option<usize>,

    /// Profit target as a fraction of the initial balance (e.g. 0.12).
    #[arg(long)]
    target: Option<f64>,

    /// Global trade budget.
    #[arg(long)]
    max_trades: Option<u64>,

    /// RNG seed. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for artifacts.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip writing artifacts.
    #[arg(long, default_value_t = false)]
    no_save: bool,
}

impl SimArgs {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        let sim = &mut config.simulation;
        if let Some(v) = self.balance {
            sim.initial_balance = v;
        }
        if let Some(v) = self.drawdown {
            sim.max_drawdown = v;
        }
        if let Some(v) = self.win_rate {
            sim.win_rate = v;
        }
        if let Some(v) = self.risk_reward {
            sim.risk_reward = v;
        }
        if let Some(v) = self.accounts {
            sim.accounts = v;
        }
        if let Some(v) = self.target {
            sim.profit_target = v;
        }
        if let Some(v) = self.max_trades {
            sim.max_trades = v;
        }
        if self.seed.is_some() {
            config.run.seed = self.seed;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Run { sim, trades, json } => {
            let save = !sim.no_save;
            run_cmd(sim.into_config()?, save, trades, json)
        }
        Commands::Batch { sim, runs, threads } => {
            let save = !sim.no_save;
            let mut config = sim.into_config()?;
            if let Some(runs) = runs {
                config.batch.runs = runs;
            }
            if threads.is_some() {
                config.batch.threads = threads;
            }
            batch_cmd(config, save)
        }
        Commands::InitConfig { path, force } => init_config_cmd(path, force),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "propsim=debug" } else { "propsim=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}

fn run_cmd(config: RunConfig, save: bool, show_trades: bool, json: bool) -> Result<()> {
    debug!(params = ?config.simulation, seed = ?config.run.seed, "resolved configuration");
    let run = run_single(&config)?;
    let summary = run.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Run {} (seed {})", run.run_id, run.seed);
        match summary.status {
            RunStatus::Converged => println!(
                "All {} accounts reached the target in {} trades.",
                summary.accounts, summary.total_trades
            ),
            RunStatus::BudgetExhausted { completed_accounts } => println!(
                "Trade budget exhausted after {} trades: {}/{} accounts reached the target.",
                summary.total_trades, completed_accounts, summary.accounts
            ),
        }
        println!();
        print!("{}", render_summary_table(&summary));
    }

    if show_trades {
        println!();
        println!(
            "{:>7}  {:>6}  {:>12}  {:>6}  {:>6}  {:>10}",
            "Account", "Trade", "Balance", "Result", "Risk", "Profit"
        );
        for t in &run.result.trades {
            println!(
                "{:>7}  {:>6}  {:>12.2}  {:>6}  {:>6}  {:>9.2}%",
                t.account + 1,
                t.trade_number,
                t.balance,
                t.outcome.to_string(),
                t.risk.to_string(),
                t.cumulative_profit_pct
            );
        }
    }

    if save {
        let paths = export_run_with_report(&config.output.dir, &run, config.output.markdown)?;
        let run_dir = paths
            .manifest
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        eprintln!("Artifacts saved to: {run_dir}");
    }

    Ok(())
}

fn batch_cmd(config: RunConfig, save: bool) -> Result<()> {
    debug!(params = ?config.simulation, runs = config.batch.runs, "resolved configuration");
    let batch = run_batch(&config, config.batch.runs)?;

    println!(
        "Batch {} (master seed {}): {} runs, {} converged, {} budget exhausted",
        batch.run_id,
        batch.master_seed,
        batch.runs.len(),
        batch.converged,
        batch.non_converged
    );
    match batch.total_trades {
        Some(stats) => println!(
            "Total trades to convergence: min {}  median {:.1}  max {}",
            stats.min, stats.median, stats.max
        ),
        None => println!("No run converged within the trade budget."),
    }

    if save {
        let paths = export_batch_with_report(&config.output.dir, &batch, config.output.markdown)?;
        eprintln!("Batch results saved to: {}", paths.batch_json.display());
    }

    Ok(())
}

fn init_config_cmd(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let text = RunConfig::default().to_toml_string()?;
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
