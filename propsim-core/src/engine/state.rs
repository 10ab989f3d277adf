//! Run context: all mutable state for one simulation, built fresh per run.

use crate::domain::{AccountState, SimulationParameters, TradeRecord};
use crate::engine::result::{AccountOutcome, RunStatus, SessionRecord, SimulationResult};

/// Mutable state that evolves trade-by-trade during a run.
///
/// Owned by a single execution context; nothing here outlives the run.
pub struct RunContext<'a> {
    pub params: &'a SimulationParameters,
    pub accounts: Vec<AccountState>,
    pub trades: Vec<TradeRecord>,
    pub sessions: Vec<SessionRecord>,
    pub total_trades: u64,
    /// Account the scheduler visits next.
    pub current: usize,
}

impl<'a> RunContext<'a> {
    /// Accounts already at the target (a target of 0) start out completed.
    pub fn new(params: &'a SimulationParameters) -> Self {
        let accounts = (0..params.accounts)
            .map(|_| {
                let mut account = AccountState::new(params.initial_balance);
                if params.target_reached(account.balance) {
                    account.mark_completed();
                }
                account
            })
            .collect();

        Self {
            params,
            accounts,
            trades: Vec::new(),
            sessions: Vec::new(),
            total_trades: 0,
            current: 0,
        }
    }

    pub fn all_completed(&self) -> bool {
        self.accounts.iter().all(|a| a.completed)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.total_trades >= self.params.max_trades
    }

    pub fn completed_accounts(&self) -> usize {
        self.accounts.iter().filter(|a| a.completed).count()
    }

    /// Round-robin successor of `index`.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.accounts.len()
    }

    pub fn into_result(self, status: RunStatus) -> SimulationResult {
        let accounts = self
            .accounts
            .into_iter()
            .enumerate()
            .map(|(i, state)| AccountOutcome::from_state(i, state))
            .collect();

        SimulationResult {
            params: self.params.clone(),
            status,
            total_trades: self.total_trades,
            trades: self.trades,
            accounts,
            sessions: self.sessions,
        }
    }
}
