//! AccountState — the mutable per-account state owned by the engine.

use super::risk::RiskLevel;
use super::trade::Outcome;

/// State of one account during a run.
///
/// Invariants:
/// - `lowest_balance` is the running minimum of every balance the account held.
/// - `max_consecutive_*` never decrease.
/// - `completed` never goes back to false.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub balance: f64,
    pub lowest_balance: f64,
    pub risk: RiskLevel,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    pub max_consecutive_wins: u32,
    pub max_consecutive_losses: u32,
    /// Number the next trade on this account will carry.
    pub next_trade_number: u64,
    pub completed: bool,
    /// Cumulative profit in percent, one entry per trade on this account.
    pub profit_series: Vec<f64>,
    pub trades: u64,
    pub sessions: u64,
    pub switches_out: u64,
    pub drawdown_stops: u64,
}

impl AccountState {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            balance: initial_balance,
            lowest_balance: initial_balance,
            risk: RiskLevel::Base,
            consecutive_wins: 0,
            consecutive_losses: 0,
            max_consecutive_wins: 0,
            max_consecutive_losses: 0,
            next_trade_number: 1,
            completed: false,
            profit_series: Vec::new(),
            trades: 0,
            sessions: 0,
            switches_out: 0,
            drawdown_stops: 0,
        }
    }

    /// Session start: risk back to 1%, current streaks cleared.
    pub fn begin_session(&mut self) {
        self.risk = RiskLevel::Base;
        self.consecutive_wins = 0;
        self.consecutive_losses = 0;
        self.sessions += 1;
    }

    /// Apply one trade outcome at the current risk level and return the new
    /// balance. Updates balance, the running minimum and both streak pairs.
    pub fn apply(&mut self, outcome: Outcome, risk_reward: f64) -> f64 {
        let risk = self.risk.fraction();
        match outcome {
            Outcome::Win => {
                self.balance *= 1.0 + risk * risk_reward;
                self.consecutive_wins += 1;
                self.consecutive_losses = 0;
                self.max_consecutive_wins = self.max_consecutive_wins.max(self.consecutive_wins);
            }
            Outcome::Loss => {
                self.balance *= 1.0 - risk;
                self.consecutive_losses += 1;
                self.consecutive_wins = 0;
                self.max_consecutive_losses =
                    self.max_consecutive_losses.max(self.consecutive_losses);
            }
        }
        self.lowest_balance = self.lowest_balance.min(self.balance);
        self.trades += 1;
        self.balance
    }

    /// Hand out the current trade number and advance it.
    pub fn take_trade_number(&mut self) -> u64 {
        let number = self.next_trade_number;
        self.next_trade_number += 1;
        number
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_compounds_by_risk_times_reward() {
        let mut account = AccountState::new(10_000.0);
        let balance = account.apply(Outcome::Win, 2.0);
        assert!((balance - 10_200.0).abs() < 1e-9);
        assert_eq!(account.consecutive_wins, 1);
        assert_eq!(account.max_consecutive_wins, 1);
        assert_eq!(account.lowest_balance, 10_000.0);
    }

    #[test]
    fn loss_tracks_lowest_balance_and_streak() {
        let mut account = AccountState::new(10_000.0);
        account.apply(Outcome::Loss, 2.0);
        account.apply(Outcome::Loss, 2.0);
        assert!((account.balance - 9_801.0).abs() < 1e-9);
        assert_eq!(account.lowest_balance, account.balance);
        assert_eq!(account.consecutive_losses, 2);
        assert_eq!(account.max_consecutive_losses, 2);
        assert_eq!(account.trades, 2);
    }

    #[test]
    fn opposite_result_resets_streak() {
        let mut account = AccountState::new(10_000.0);
        account.apply(Outcome::Win, 1.0);
        account.apply(Outcome::Win, 1.0);
        account.apply(Outcome::Loss, 1.0);
        assert_eq!(account.consecutive_wins, 0);
        assert_eq!(account.consecutive_losses, 1);
        assert_eq!(account.max_consecutive_wins, 2);
    }

    #[test]
    fn session_start_resets_risk_and_current_streaks_only() {
        let mut account = AccountState::new(10_000.0);
        account.apply(Outcome::Loss, 1.0);
        account.risk = RiskLevel::Reduced;
        account.begin_session();
        assert_eq!(account.risk, RiskLevel::Base);
        assert_eq!(account.consecutive_losses, 0);
        assert_eq!(account.max_consecutive_losses, 1);
        assert_eq!(account.sessions, 1);
    }

    #[test]
    fn trade_numbers_are_sequential() {
        let mut account = AccountState::new(10_000.0);
        assert_eq!(account.take_trade_number(), 1);
        assert_eq!(account.take_trade_number(), 2);
        assert_eq!(account.next_trade_number, 3);
    }
}
