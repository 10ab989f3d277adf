//! TradeRecord — one executed trade, appended to the run's trade log.

use super::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// A draw below the win rate is a win.
    pub fn from_draw(draw: f64, win_rate: f64) -> Self {
        if draw < win_rate {
            Self::Win
        } else {
            Self::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == Self::Win
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "Win"),
            Self::Loss => write!(f, "Loss"),
        }
    }
}

/// A single executed trade. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// 0-based account index.
    pub account: usize,
    /// Per-account trade number, 1-based. Restarts at 1 when the account is
    /// entered through a switch.
    pub trade_number: u64,
    /// Balance after the trade.
    pub balance: f64,
    pub outcome: Outcome,
    /// Risk level the trade was taken at.
    pub risk: RiskLevel,
    /// Cumulative profit after the trade, in percent.
    pub cumulative_profit_pct: f64,
}
