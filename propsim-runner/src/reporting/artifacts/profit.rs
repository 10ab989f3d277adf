//! Cumulative-profit series export (CSV).

use anyhow::{Context, Result};
use std::path::Path;

/// Write aligned profit series: one row per trade index, one column per
/// account. The row count is the longest series; missing and `None` cells are
/// written empty.
pub fn write_cumulative_profit_csv(path: &Path, series: &[Vec<Option<f64>>]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create profit CSV {}", path.display()))?;

    let mut header = vec!["trade".to_string()];
    header.extend((1..=series.len()).map(|a| format!("account_{a}")));
    wtr.write_record(&header)?;

    let rows = series.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = vec![(i + 1).to_string()];
        record.extend(series.iter().map(|s| {
            s.get(i)
                .copied()
                .flatten()
                .map(|v| format!("{v:.4}"))
                .unwrap_or_default()
        }));
        wtr.write_record(&record)?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to write profit CSV {}", path.display()))?;
    Ok(())
}
