//! Quote joining and derived moneyness fields.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{Result, ViewerError};
use crate::types::{EnrichedRow, OptionRight, PositionRecord};

/// Joins spot prices onto position records, computing the derived fields.
///
/// One output row per input record, in input order. Pure: the result
/// depends only on the arguments.
///
/// # Errors
///
/// `ViewerError::MissingQuote` if a record's ticker is absent from the
/// quote map; `ViewerError::Computation` if its spot price is zero.
pub fn enrich_rows(
    records: &[PositionRecord],
    quotes: &HashMap<String, Decimal>,
) -> Result<Vec<EnrichedRow>> {
    records
        .iter()
        .map(|record| enrich_one(record, quotes))
        .collect()
}

fn enrich_one(record: &PositionRecord, quotes: &HashMap<String, Decimal>) -> Result<EnrichedRow> {
    let spot = *quotes
        .get(&record.ticker)
        .ok_or_else(|| ViewerError::missing_quote(&record.ticker))?;
    if spot.is_zero() {
        return Err(ViewerError::computation(format!(
            "zero spot price for {}",
            record.ticker
        )));
    }

    let (in_the_money, distance) = match record.right {
        OptionRight::Put => (spot < record.strike, spot - record.strike),
        OptionRight::Call => (spot > record.strike, record.strike - spot),
    };
    let dist_to_atm = distance.round_dp(2);
    let pct_to_atm = (dist_to_atm / spot * Decimal::ONE_HUNDRED).round_dp(2);

    Ok(EnrichedRow {
        record: record.clone(),
        spot,
        in_the_money,
        dist_to_atm,
        pct_to_atm,
    })
}
