//! The per-tick computation: quotes in, ordered classified rows out.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::enrich::enrich_rows;
use crate::error::Result;
use crate::order::sort_rows;
use crate::severity::classify_rows;
use crate::types::{DisplayRow, PositionRecord};

/// Runs the full per-tick pipeline: enrich, sort, classify.
///
/// This is the pure function the refresh scheduler re-runs every tick;
/// it has no timer, transport, or display knowledge and is independently
/// testable.
///
/// # Errors
///
/// Propagates quote-join failures (`MissingQuote`, `Computation`).
pub fn compute_display_rows(
    records: &[PositionRecord],
    quotes: &HashMap<String, Decimal>,
) -> Result<Vec<DisplayRow>> {
    let mut rows = enrich_rows(records, quotes)?;
    sort_rows(&mut rows);
    Ok(classify_rows(rows))
}
