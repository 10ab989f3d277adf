//! Markdown report generator.

use crate::batch::BatchResult;
use crate::metrics::RunSummary;
use crate::runner::SimulationRun;
use propsim_core::{RunStatus, SimulationParameters};

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, run: &SimulationRun) -> String {
        let summary = run.summary();
        let mut report = format!(
            "# Propsim Run Report\n\n\
Run ID: `{}`\n\
Seed: `{}`\n\n\
## Summary\n\
- Status: {}\n\
- Total Trades: {}\n\
- Completed Accounts: {} / {}\n\
- Realized Win Rate: {:.1}%\n",
            run.run_id,
            run.seed,
            status_label(&summary.status),
            summary.total_trades,
            summary.completed_accounts,
            summary.accounts,
            summary.realized_win_pct,
        );
        if let Some(mean) = summary.mean_trades_to_target {
            report.push_str(&format!("- Mean Trades to Target: {mean:.1}\n"));
        }

        report.push_str(&parameters_section(&run.result.params));
        report.push_str(&accounts_section(&summary));
        report
    }

    pub fn generate_batch(&self, batch: &BatchResult) -> String {
        let mut report = format!(
            "# Propsim Batch Report\n\n\
Run ID: `{}`\n\
Master Seed: `{}`\n\n\
## Summary\n\
- Runs: {}\n\
- Converged: {}\n\
- Budget Exhausted: {}\n",
            batch.run_id,
            batch.master_seed,
            batch.runs.len(),
            batch.converged,
            batch.non_converged,
        );
        match batch.total_trades {
            Some(stats) => report.push_str(&format!(
                "- Total Trades (converged): min {} / median {:.1} / max {}\n",
                stats.min, stats.median, stats.max
            )),
            None => report.push_str("- Total Trades (converged): n/a\n"),
        }

        report.push_str(&parameters_section(&batch.params));

        report.push_str("\n## Runs\n\n");
        report.push_str("| Run | Seed | Status | Total Trades |\n");
        report.push_str("|-----|------|--------|--------------|\n");
        for run in &batch.runs {
            report.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                run.index + 1,
                run.seed,
                status_label(&run.status),
                run.total_trades
            ));
        }
        report
    }
}

fn status_label(status: &RunStatus) -> String {
    match status {
        RunStatus::Converged => "converged".to_string(),
        RunStatus::BudgetExhausted { completed_accounts } => {
            format!("budget exhausted ({completed_accounts} accounts complete)")
        }
    }
}

fn parameters_section(params: &SimulationParameters) -> String {
    format!(
        "\n## Parameters\n\
- Initial Balance: ${:.2}\n\
- Max Drawdown: {:.2}%\n\
- Win Rate: {:.1}%\n\
- Risk:Reward: {:.2}\n\
- Accounts: {}\n\
- Profit Target: {:.2}%\n\
- Trade Budget: {}\n",
        params.initial_balance,
        params.max_drawdown * 100.0,
        params.win_rate * 100.0,
        params.risk_reward,
        params.accounts,
        params.profit_target * 100.0,
        params.max_trades,
    )
}

fn accounts_section(summary: &RunSummary) -> String {
    let mut section = String::from("\n## Accounts\n\n");
    section.push_str(
        "| Account | Final Balance | Profit % | Max Drawdown % | Max Wins | Max Losses | Trades | Switches | Drawdown Stops |\n",
    );
    section.push_str(
        "|---------|---------------|----------|----------------|----------|------------|--------|----------|----------------|\n",
    );
    for row in &summary.rows {
        section.push_str(&format!(
            "| {} | ${:.2} | {:+.2}% | {:.2}% | {} | {} | {} | {} | {} |\n",
            row.account,
            row.final_balance,
            row.profit_pct,
            row.max_drawdown_pct,
            row.max_consecutive_wins,
            row.max_consecutive_losses,
            row.trades,
            row.switches_out,
            row.drawdown_stops,
        ));
    }
    section
}
