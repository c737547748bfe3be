//! Raw account payload to normalized position records.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::symbol;
use crate::types::{OptionRight, PositionRecord, RawPosition, Side};

/// Parsed output of one raw position payload: the records in payload
/// order and the distinct underlying tickers present.
#[derive(Debug, Clone, Default)]
pub struct ParsedPositions {
    pub records: Vec<PositionRecord>,
    pub tickers: BTreeSet<String>,
}

/// Parses raw position entries into records, keeping option positions only.
///
/// A non-zero short quantity wins over the long quantity when deciding the
/// side. Entries whose asset type is not "Option" and entries with no open
/// quantity at all are silently skipped. Emission order is payload order;
/// the canonical display order is imposed downstream.
///
/// # Errors
///
/// A malformed option symbol or an unknown put/call flag aborts the whole
/// parse with `ViewerError::Parse` — no partial record set is produced.
pub fn parse_positions(raw: &[RawPosition]) -> Result<ParsedPositions> {
    let mut records = Vec::new();
    let mut tickers = BTreeSet::new();

    for pos in raw {
        let (side, quantity) = if !pos.short_quantity.is_zero() {
            (Side::Short, pos.short_quantity)
        } else if !pos.long_quantity.is_zero() {
            (Side::Long, pos.long_quantity)
        } else {
            debug!(symbol = %pos.symbol, "Skipping position with no open quantity");
            continue;
        };

        if !pos.asset_type.eq_ignore_ascii_case("option") {
            debug!(
                symbol = %pos.symbol,
                asset_type = %pos.asset_type,
                "Skipping non-option asset"
            );
            continue;
        }

        let parsed = symbol::parse_option_symbol(&pos.symbol)?;
        let right = match pos.put_call.to_ascii_uppercase().as_str() {
            "PUT" => OptionRight::Put,
            "CALL" => OptionRight::Call,
            other => {
                return Err(ViewerError::parse(
                    &pos.symbol,
                    format!("unknown putCall value '{other}'"),
                ))
            }
        };

        tickers.insert(pos.underlying_symbol.clone());
        records.push(PositionRecord {
            side,
            right,
            ticker: pos.underlying_symbol.clone(),
            quantity,
            strike: parsed.strike,
            expiry: parsed.expiry,
        });
    }

    Ok(ParsedPositions { records, tickers })
}
