//! Result bundle returned by a completed (or budget-capped) run.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountState, SimulationParameters, TradeRecord};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every account reached the profit target.
    Converged,
    /// The trade budget ran out first.
    BudgetExhausted { completed_accounts: usize },
}

impl RunStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Why a trading session handed control back to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// Second consecutive loss: control moves to the next account.
    SwitchOut,
    /// Loss from the initial balance reached the drawdown limit.
    DrawdownStop,
    /// Cumulative profit reached the target; the account is complete.
    TargetReached,
    /// Global trade budget exhausted mid-session.
    BudgetExhausted,
}

/// One uninterrupted stretch of trading on a single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub account: usize,
    /// Index into the trade log of the session's first trade.
    pub first_trade: usize,
    pub trades: u64,
    pub end: SessionEnd,
}

/// Per-account summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOutcome {
    pub index: usize,
    pub final_balance: f64,
    pub lowest_balance: f64,
    pub max_consecutive_wins: u32,
    pub max_consecutive_losses: u32,
    pub trades: u64,
    pub sessions: u64,
    pub switches_out: u64,
    pub drawdown_stops: u64,
    pub completed: bool,
    /// Cumulative profit in percent after each trade on this account.
    pub cumulative_profit_pct: Vec<f64>,
}

impl AccountOutcome {
    pub(crate) fn from_state(index: usize, state: AccountState) -> Self {
        Self {
            index,
            final_balance: state.balance,
            lowest_balance: state.lowest_balance,
            max_consecutive_wins: state.max_consecutive_wins,
            max_consecutive_losses: state.max_consecutive_losses,
            trades: state.trades,
            sessions: state.sessions,
            switches_out: state.switches_out,
            drawdown_stops: state.drawdown_stops,
            completed: state.completed,
            cumulative_profit_pct: state.profit_series,
        }
    }
}

/// Everything a run produces. Account order is preserved in every per-account
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub params: SimulationParameters,
    pub status: RunStatus,
    pub total_trades: u64,
    /// Trade log in emission order.
    pub trades: Vec<TradeRecord>,
    pub accounts: Vec<AccountOutcome>,
    pub sessions: Vec<SessionRecord>,
}

impl SimulationResult {
    pub fn final_balances(&self) -> Vec<f64> {
        self.accounts.iter().map(|a| a.final_balance).collect()
    }

    pub fn lowest_balances(&self) -> Vec<f64> {
        self.accounts.iter().map(|a| a.lowest_balance).collect()
    }

    pub fn max_consecutive_wins(&self) -> Vec<u32> {
        self.accounts.iter().map(|a| a.max_consecutive_wins).collect()
    }

    pub fn max_consecutive_losses(&self) -> Vec<u32> {
        self.accounts.iter().map(|a| a.max_consecutive_losses).collect()
    }

    pub fn cumulative_profit_series(&self) -> Vec<&[f64]> {
        self.accounts
            .iter()
            .map(|a| a.cumulative_profit_pct.as_slice())
            .collect()
    }

    /// Trades of one account, in emission order.
    pub fn trades_for(&self, account: usize) -> impl Iterator<Item = &TradeRecord> + '_ {
        self.trades.iter().filter(move |t| t.account == account)
    }

    pub fn completed_accounts(&self) -> usize {
        self.accounts.iter().filter(|a| a.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_simulation;
    use crate::rng::RandomOutcomes;

    #[test]
    fn json_round_trip_preserves_every_float() {
        let params = SimulationParameters {
            accounts: 3,
            ..Default::default()
        };
        let result = run_simulation(&params, &mut RandomOutcomes::seeded(2)).unwrap();
        assert!(!result.trades.is_empty());

        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back.trades, result.trades);
        assert_eq!(back.accounts, result.accounts);
        assert_eq!(back.params, result.params);
        assert_eq!(back.status, result.status);
        assert_eq!(back.total_trades, result.total_trades);
    }
}
