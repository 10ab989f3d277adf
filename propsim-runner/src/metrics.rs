//! Per-account and per-run summary metrics.
//!
//! All functions are pure: a `SimulationResult` in, summary rows out. These feed
//! the report and artifact writers; nothing here affects the simulation.

use serde::{Deserialize, Serialize};

use propsim_core::{RunStatus, SimulationResult};

/// One row of the per-account performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// 1-based account label, as shown in reports.
    pub account: usize,
    pub final_balance: f64,
    /// (final − initial) / initial × 100.
    pub profit_pct: f64,
    /// (lowest − initial) / initial × 100. Zero or negative.
    pub max_drawdown_pct: f64,
    pub max_consecutive_wins: u32,
    pub max_consecutive_losses: u32,
    pub trades: u64,
    pub sessions: u64,
    pub switches_out: u64,
    pub drawdown_stops: u64,
    pub completed: bool,
}

/// Run-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub total_trades: u64,
    pub accounts: usize,
    pub completed_accounts: usize,
    /// Share of all trades that were wins, in percent.
    pub realized_win_pct: f64,
    /// Mean trades per completed account.
    pub mean_trades_to_target: Option<f64>,
    pub rows: Vec<AccountSummary>,
}

impl RunSummary {
    pub fn from_result(result: &SimulationResult) -> Self {
        let initial = result.params.initial_balance;
        let rows: Vec<AccountSummary> = result
            .accounts
            .iter()
            .map(|a| AccountSummary {
                account: a.index + 1,
                final_balance: a.final_balance,
                profit_pct: (a.final_balance - initial) / initial * 100.0,
                max_drawdown_pct: (a.lowest_balance - initial) / initial * 100.0,
                max_consecutive_wins: a.max_consecutive_wins,
                max_consecutive_losses: a.max_consecutive_losses,
                trades: a.trades,
                sessions: a.sessions,
                switches_out: a.switches_out,
                drawdown_stops: a.drawdown_stops,
                completed: a.completed,
            })
            .collect();

        let wins = result.trades.iter().filter(|t| t.outcome.is_win()).count();
        let realized_win_pct = if result.trades.is_empty() {
            0.0
        } else {
            wins as f64 / result.trades.len() as f64 * 100.0
        };

        let completed: Vec<&AccountSummary> = rows.iter().filter(|r| r.completed).collect();
        let mean_trades_to_target = if completed.is_empty() {
            None
        } else {
            Some(completed.iter().map(|r| r.trades as f64).sum::<f64>() / completed.len() as f64)
        };

        Self {
            status: result.status,
            total_trades: result.total_trades,
            accounts: rows.len(),
            completed_accounts: completed.len(),
            realized_win_pct,
            mean_trades_to_target,
            rows,
        }
    }
}

/// Cumulative-profit series aligned on a common trade-index axis.
///
/// Every series is padded with `None` up to the longest series length, so a
/// chart or table can index all accounts by trade number.
pub fn padded_profit_series(result: &SimulationResult) -> Vec<Vec<Option<f64>>> {
    let series = result.cumulative_profit_series();
    let len = series.iter().map(|s| s.len()).max().unwrap_or(0);
    series
        .iter()
        .map(|s| {
            let mut padded: Vec<Option<f64>> = s.iter().copied().map(Some).collect();
            padded.resize(len, None);
            padded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use propsim_core::rng::ScriptedOutcomes;
    use propsim_core::{run_simulation, SimulationParameters};

    fn winning_result(accounts: usize) -> SimulationResult {
        let params = SimulationParameters {
            win_rate: 1.0,
            accounts,
            ..Default::default()
        };
        run_simulation(&params, &mut ScriptedOutcomes::from_wins(&[true])).unwrap()
    }

    #[test]
    fn rows_are_one_based_and_ordered() {
        let summary = RunSummary::from_result(&winning_result(3));
        let labels: Vec<usize> = summary.rows.iter().map(|r| r.account).collect();
        assert_eq!(labels, vec![1, 2, 3]);
        assert_eq!(summary.completed_accounts, 3);
        assert_eq!(summary.realized_win_pct, 100.0);
        assert_eq!(summary.mean_trades_to_target, Some(5.0));
    }

    #[test]
    fn profit_and_drawdown_percentages() {
        let summary = RunSummary::from_result(&winning_result(1));
        let row = &summary.rows[0];
        assert!(row.profit_pct >= 12.0);
        assert_eq!(row.max_drawdown_pct, 0.0);
    }

    #[test]
    fn losing_run_has_negative_drawdown_and_no_mean() {
        let params = SimulationParameters {
            win_rate: 0.0,
            accounts: 2,
            max_trades: 10,
            ..Default::default()
        };
        let result =
            run_simulation(&params, &mut ScriptedOutcomes::from_wins(&[false])).unwrap();
        let summary = RunSummary::from_result(&result);
        assert!(summary.rows.iter().all(|r| r.max_drawdown_pct < 0.0));
        assert_eq!(summary.mean_trades_to_target, None);
        assert_eq!(summary.realized_win_pct, 0.0);
        assert!(!summary.status.is_converged());
    }

    #[test]
    fn padding_aligns_series_lengths() {
        let params = SimulationParameters {
            win_rate: 0.5,
            accounts: 2,
            max_trades: 3,
            ..Default::default()
        };
        // Account 0: loss, loss (switch). Account 1: one win before the budget.
        let result = run_simulation(
            &params,
            &mut ScriptedOutcomes::from_wins(&[false, false, true]),
        )
        .unwrap();
        let padded = padded_profit_series(&result);
        assert_eq!(padded.len(), 2);
        assert_eq!(padded[0].len(), 2);
        assert_eq!(padded[1].len(), 2);
        assert!(padded[1][0].is_some());
        assert_eq!(padded[1][1], None);
    }
}
