//! Trade log export (CSV).

use anyhow::{Context, Result};
use std::path::Path;

use propsim_core::TradeRecord;

/// One row per trade. Accounts are 1-based; risk and cumulative profit are
/// percentages with two decimals.
pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;

    wtr.write_record([
        "account",
        "trade",
        "balance",
        "result",
        "risk",
        "cumulative_profit",
    ])?;

    for t in trades {
        wtr.write_record([
            &(t.account + 1).to_string(),
            &t.trade_number.to_string(),
            &format!("{:.2}", t.balance),
            &t.outcome.to_string(),
            &t.risk.to_string(),
            &format!("{:.2}%", t.cumulative_profit_pct),
        ])?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to write trades CSV {}", path.display()))?;
    Ok(())
}
