//! SimulationParameters — the immutable input to a run, plus validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default global trade budget. A run that has not converged after this many
/// trades is returned with `RunStatus::BudgetExhausted`.
pub const DEFAULT_MAX_TRADES: u64 = 1_000_000;

/// Largest accepted account count. Account state is allocated up front.
pub const MAX_ACCOUNTS: usize = 10_000;

/// Parameter validation failures. Detected before any state is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("initial balance must be positive, got {0}")]
    NonPositiveBalance(f64),

    #[error("{name} must be within [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("risk:reward ratio must be at least 1, got {0}")]
    RiskRewardBelowOne(f64),

    #[error("account count must be at least 1")]
    NoAccounts,

    #[error("account count must be at most {max}, got {count}")]
    TooManyAccounts { count: usize, max: usize },

    #[error("profit target must be non-negative, got {0}")]
    NegativeProfitTarget(f64),

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("trade budget must be at least 1")]
    ZeroTradeBudget,
}

/// Input parameters for one simulation run.
///
/// Fractions are plain decimals: a drawdown limit of 8% is `0.08`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Starting balance of every account.
    pub initial_balance: f64,
    /// Drawdown (fraction of initial balance) at which a session is stopped.
    pub max_drawdown: f64,
    /// Probability of a winning trade.
    pub win_rate: f64,
    /// Reward multiple of the risked amount on a win.
    pub risk_reward: f64,
    pub accounts: usize,
    /// Cumulative profit (fraction of initial balance) that completes an account.
    pub profit_target: f64,
    /// Upper bound on the global trade count.
    pub max_trades: u64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_balance: 25_000.0,
            max_drawdown: 0.08,
            win_rate: 0.5,
            risk_reward: 2.0,
            accounts: 5,
            profit_target: 0.12,
            max_trades: DEFAULT_MAX_TRADES,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, value) in [
            ("initial balance", self.initial_balance),
            ("max drawdown", self.max_drawdown),
            ("win rate", self.win_rate),
            ("risk:reward ratio", self.risk_reward),
            ("profit target", self.profit_target),
        ] {
            if !value.is_finite() {
                return Err(ParamError::NonFinite(name));
            }
        }

        if self.initial_balance <= 0.0 {
            return Err(ParamError::NonPositiveBalance(self.initial_balance));
        }
        check_fraction("max drawdown", self.max_drawdown)?;
        check_fraction("win rate", self.win_rate)?;
        if self.risk_reward < 1.0 {
            return Err(ParamError::RiskRewardBelowOne(self.risk_reward));
        }
        if self.accounts == 0 {
            return Err(ParamError::NoAccounts);
        }
        if self.accounts > MAX_ACCOUNTS {
            return Err(ParamError::TooManyAccounts {
                count: self.accounts,
                max: MAX_ACCOUNTS,
            });
        }
        if self.profit_target < 0.0 {
            return Err(ParamError::NegativeProfitTarget(self.profit_target));
        }
        if self.max_trades == 0 {
            return Err(ParamError::ZeroTradeBudget);
        }
        Ok(())
    }

    /// (balance − initial) / initial, as a fraction.
    pub fn cumulative_profit(&self, balance: f64) -> f64 {
        (balance - self.initial_balance) / self.initial_balance
    }

    /// (initial − balance) / initial, as a fraction. Negative while in profit.
    pub fn drawdown(&self, balance: f64) -> f64 {
        (self.initial_balance - balance) / self.initial_balance
    }

    pub fn target_reached(&self, balance: f64) -> bool {
        self.cumulative_profit(balance) >= self.profit_target
    }

    /// Drawdown stop: the absolute loss has reached the configured limit.
    pub fn drawdown_breached(&self, balance: f64) -> bool {
        self.initial_balance - balance >= self.initial_balance * self.max_drawdown
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ParamError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::FractionOutOfRange { name, value })
    }
}
