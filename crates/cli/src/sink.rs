//! Stdout rendering of computed rows.

use std::fmt::Write as _;

use async_trait::async_trait;

use optviewer_core::{DisplayRow, DisplaySink, Result, Severity};

/// Reprints the full row table on every publish. Rendering stays here;
/// the pipeline hands over data and abstract severity tags only.
#[derive(Default)]
pub struct StdoutSink;

impl StdoutSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DisplaySink for StdoutSink {
    async fn publish(&self, rows: &[DisplayRow]) -> Result<()> {
        print!("{}", render_table(rows));
        Ok(())
    }
}

/// Short textual marker for a severity bucket.
fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "!!!",
        Severity::Warning => "!! ",
        Severity::Caution => "!  ",
        Severity::Normal => "   ",
    }
}

/// Renders rows as an aligned text table, one line per position.
#[must_use]
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:3} {:<5} {:<4} {:<6} {:>8} {:>9} {:>9} {:>13} {:>9} {:>8}  {}",
        "", "Side", "P/C", "Ticker", "Qty", "Strike", "Spot", "InTheMoney", "DistATM", "PctATM", "Expiry"
    );
    for display in rows {
        let row = &display.row;
        let record = &row.record;
        let _ = writeln!(
            out,
            "{:3} {:<5} {:<4} {:<6} {:>8} {:>9} {:>9} {:>13} {:>9} {:>8}  {}",
            marker(display.severity),
            record.side.to_string(),
            record.right.to_string(),
            record.ticker,
            record.quantity.to_string(),
            record.strike.to_string(),
            row.spot.to_string(),
            if row.in_the_money {
                "IN THE MONEY"
            } else {
                "Out the money"
            },
            row.dist_to_atm.to_string(),
            row.pct_to_atm.to_string(),
            record.expiry,
        );
    }
    out
}
