//! RiskLevel — the four per-trade risk tiers and the adaptive transition rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative profit at or above which risk steps up to `Max`.
pub const MAX_RISK_PROFIT: f64 = 0.06;
/// Cumulative profit at or above which risk steps up to `Elevated`.
pub const ELEVATED_RISK_PROFIT: f64 = 0.03;
/// Drawdown at or above which risk steps down to `Reduced`.
pub const REDUCED_RISK_DRAWDOWN: f64 = 0.03;

/// Fraction of the current balance risked on one trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 0.5%
    Reduced,
    /// 1%, the level every session starts at.
    #[default]
    Base,
    /// 1.5%
    Elevated,
    /// 2%
    Max,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Reduced, Self::Base, Self::Elevated, Self::Max];

    pub fn fraction(self) -> f64 {
        match self {
            Self::Reduced => 0.005,
            Self::Base => 0.01,
            Self::Elevated => 0.015,
            Self::Max => 0.02,
        }
    }

    pub fn percent(self) -> f64 {
        self.fraction() * 100.0
    }

    /// Risk level for the next trade.
    ///
    /// A loss taken at `Elevated` or `Max` first drops back to `Base`. The
    /// profit/drawdown ladder is then applied, first match wins; when nothing
    /// matches the level carries over unchanged.
    pub fn next(self, was_loss: bool, cumulative_profit: f64, drawdown: f64) -> RiskLevel {
        let current = if was_loss && matches!(self, Self::Elevated | Self::Max) {
            Self::Base
        } else {
            self
        };

        if cumulative_profit >= MAX_RISK_PROFIT {
            Self::Max
        } else if cumulative_profit >= ELEVATED_RISK_PROFIT {
            Self::Elevated
        } else if drawdown >= REDUCED_RISK_DRAWDOWN {
            Self::Reduced
        } else {
            current
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}
