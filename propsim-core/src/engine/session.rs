//! Inner trading session on a single account.
//!
//! Per trade, in order:
//! 1. Draw an outcome and apply it at the current risk level.
//! 2. Record the balance, profit point and trade record.
//! 3. Second consecutive loss: switch to the next account and stop.
//! 4. Recompute the risk level.
//! 5. Drawdown limit reached: stop without a switch.
//! 6. Profit target reached: mark complete and stop.

use tracing::{debug, trace};

use crate::domain::{Outcome, TradeRecord};
use crate::engine::result::{SessionEnd, SessionRecord};
use crate::engine::state::RunContext;
use crate::rng::OutcomeSource;

/// Consecutive losses that force a switch to the next account.
pub const SWITCH_AFTER_LOSSES: u32 = 2;

/// Trade account `index` until one of the session's exit conditions fires.
pub fn run_session<S: OutcomeSource + ?Sized>(
    ctx: &mut RunContext<'_>,
    index: usize,
    source: &mut S,
) -> SessionEnd {
    let params = ctx.params;
    let first_trade = ctx.trades.len();
    let mut session_trades = 0u64;

    let account = &mut ctx.accounts[index];
    account.begin_session();
    debug!(account = index, balance = account.balance, "session start");

    let end = loop {
        if ctx.total_trades >= params.max_trades {
            break SessionEnd::BudgetExhausted;
        }

        let outcome = Outcome::from_draw(source.next_draw(), params.win_rate);
        let risk = account.risk;
        let balance = account.apply(outcome, params.risk_reward);
        let profit = params.cumulative_profit(balance);
        account.profit_series.push(profit * 100.0);

        let record = TradeRecord {
            account: index,
            trade_number: account.take_trade_number(),
            balance,
            outcome,
            risk,
            cumulative_profit_pct: profit * 100.0,
        };
        trace!(?record, "trade");
        ctx.trades.push(record);
        ctx.total_trades += 1;
        session_trades += 1;

        if account.consecutive_losses == SWITCH_AFTER_LOSSES {
            account.consecutive_losses = 0;
            account.switches_out += 1;
            break SessionEnd::SwitchOut;
        }

        account.risk = account
            .risk
            .next(outcome == Outcome::Loss, profit, params.drawdown(balance));

        if params.drawdown_breached(balance) {
            account.drawdown_stops += 1;
            break SessionEnd::DrawdownStop;
        }

        if params.target_reached(balance) {
            account.mark_completed();
            break SessionEnd::TargetReached;
        }
    };

    if end == SessionEnd::SwitchOut {
        let next = ctx.next_index(index);
        ctx.accounts[next].next_trade_number = 1;
        ctx.current = next;
    }

    debug!(account = index, trades = session_trades, ?end, "session end");
    ctx.sessions.push(SessionRecord {
        account: index,
        first_trade,
        trades: session_trades,
        end,
    });
    end
}
