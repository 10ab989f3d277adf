//! Plain-text summary table for terminal output.

use crate::metrics::RunSummary;

const HEADER: [&str; 7] = [
    "Account",
    "Final Balance",
    "Profit %",
    "Max Drawdown %",
    "Max Wins",
    "Max Losses",
    "Trades",
];

/// Fixed-width table, one row per account, right-aligned numbers.
pub fn render_summary_table(summary: &RunSummary) -> String {
    let rows: Vec<[String; 7]> = summary
        .rows
        .iter()
        .map(|r| {
            [
                r.account.to_string(),
                format!("{:.2}", r.final_balance),
                format!("{:.2}", r.profit_pct),
                format!("{:.2}", r.max_drawdown_pct),
                r.max_consecutive_wins.to_string(),
                r.max_consecutive_losses.to_string(),
                r.trades.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADER
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:>w$}"))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:>w$}"))
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}
