//! Round-robin scheduler — the outer loop of the engine.
//!
//! Per turn:
//! 1. Stop when every account is complete, or when the trade budget is gone.
//! 2. An account already at the target is parked: mark it complete and move on.
//! 3. Otherwise run one trading session on it, then move to the next account.
//!    A switch-out hands over inside the session (and restarts the incoming
//!    account's trade numbering); a drawdown stop or a reached target just
//!    advances the index. A drawdown-stopped account is revisited next round at
//!    its drawn-down balance, with risk back at 1%.

use tracing::{info, warn};

use crate::domain::{ParamError, SimulationParameters};
use crate::engine::result::{RunStatus, SessionEnd, SimulationResult};
use crate::engine::session::run_session;
use crate::engine::state::RunContext;
use crate::rng::OutcomeSource;

/// Run a full simulation.
///
/// Fails only on invalid parameters, before any state is created. A run that
/// exhausts `params.max_trades` is returned with `RunStatus::BudgetExhausted`
/// and everything accumulated up to that point.
pub fn run_simulation<S: OutcomeSource + ?Sized>(
    params: &SimulationParameters,
    source: &mut S,
) -> Result<SimulationResult, ParamError> {
    params.validate()?;

    let mut ctx = RunContext::new(params);

    let status = loop {
        if ctx.all_completed() {
            break RunStatus::Converged;
        }
        if ctx.budget_exhausted() {
            break RunStatus::BudgetExhausted {
                completed_accounts: ctx.completed_accounts(),
            };
        }

        let index = ctx.current;
        let balance = ctx.accounts[index].balance;
        if params.target_reached(balance) {
            ctx.accounts[index].mark_completed();
            ctx.current = ctx.next_index(index);
            continue;
        }

        match run_session(&mut ctx, index, source) {
            SessionEnd::SwitchOut => {}
            SessionEnd::DrawdownStop | SessionEnd::TargetReached => {
                ctx.current = ctx.next_index(index);
            }
            SessionEnd::BudgetExhausted => {
                break RunStatus::BudgetExhausted {
                    completed_accounts: ctx.completed_accounts(),
                };
            }
        }
    };

    match status {
        RunStatus::Converged => info!(
            accounts = params.accounts,
            total_trades = ctx.total_trades,
            "all accounts reached the profit target"
        ),
        RunStatus::BudgetExhausted { completed_accounts } => warn!(
            completed_accounts,
            accounts = params.accounts,
            max_trades = params.max_trades,
            "trade budget exhausted before every account reached the target"
        ),
    }

    Ok(ctx.into_result(status))
}
