//! propsim core — multi-account trading simulation under an adaptive risk policy.
//!
//! This crate contains the engine:
//! - Domain types (parameters, risk levels, outcomes, trade records, account state)
//! - Outcome sources: seeded `rand` generators and scripted draw sequences
//! - The per-account session state machine (switch-out, drawdown stop, target)
//! - The round-robin scheduler that runs until every account reaches its target
//!   or the trade budget is exhausted

pub mod domain;
pub mod engine;
pub mod rng;

pub use domain::{
    AccountState, Outcome, ParamError, RiskLevel, SimulationParameters, TradeRecord,
    DEFAULT_MAX_TRADES, MAX_ACCOUNTS,
};
pub use engine::{run_simulation, AccountOutcome, RunStatus, SessionEnd, SimulationResult};
pub use rng::{OutcomeSource, RandomOutcomes, ScriptedOutcomes, SeedHierarchy};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: result and parameter types are Send + Sync, so the
    /// runner can fan runs out across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<SimulationParameters>();
        require_sync::<SimulationParameters>();
        require_send::<SimulationResult>();
        require_sync::<SimulationResult>();
        require_send::<TradeRecord>();
        require_sync::<TradeRecord>();
        require_send::<AccountOutcome>();
        require_sync::<AccountOutcome>();
        require_send::<RandomOutcomes<rand::rngs::StdRng>>();
        require_send::<ScriptedOutcomes>();
        require_send::<SeedHierarchy>();
        require_sync::<SeedHierarchy>();
    }

    /// The engine accepts a trait object, so callers can choose the outcome
    /// source at runtime.
    #[test]
    fn engine_accepts_dyn_outcome_source() {
        let params = SimulationParameters {
            win_rate: 1.0,
            accounts: 1,
            profit_target: 0.019,
            ..Default::default()
        };
        let mut scripted = ScriptedOutcomes::from_wins(&[true]);
        let source: &mut dyn OutcomeSource = &mut scripted;
        let result = run_simulation(&params, source).unwrap();
        assert_eq!(result.total_trades, 1);
    }
}
