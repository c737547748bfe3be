//! Encoded option symbol parsing.
//!
//! Wire format: `<TICKER>_<MMDDYY><P|C><STRIKE>`, underscore-delimited,
//! 6-digit expiry date, 1-character put/call flag, remaining characters
//! (with optional decimal point) as the strike. Example:
//! `AAPL_011224P150.5` is the AAPL 150.5 put expiring 2024-01-12.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Result, ViewerError};
use crate::types::OptionRight;

/// Fields decoded from an encoded option symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSymbol {
    pub expiry: NaiveDate,
    pub right: OptionRight,
    pub strike: Decimal,
}

/// Parses an encoded option symbol into its expiry, right, and strike.
///
/// # Errors
///
/// Returns `ViewerError::Parse` if the separator is absent, the date
/// substring is not a valid MMDDYY date, the put/call flag is unknown, or
/// the strike substring is not a valid decimal.
pub fn parse_option_symbol(symbol: &str) -> Result<ParsedSymbol> {
    if !symbol.is_ascii() {
        return Err(ViewerError::parse(symbol, "non-ASCII symbol"));
    }

    let separator = symbol
        .find('_')
        .ok_or_else(|| ViewerError::parse(symbol, "missing '_' separator"))?;
    let tail = &symbol[separator + 1..];

    // 6 date chars + flag + at least one strike char.
    if tail.len() < 8 {
        return Err(ViewerError::parse(symbol, "truncated after separator"));
    }

    let (date_part, rest) = tail.split_at(6);
    let expiry = NaiveDate::parse_from_str(date_part, "%m%d%y").map_err(|e| {
        ViewerError::parse(symbol, format!("invalid MMDDYY date '{date_part}': {e}"))
    })?;

    let flag = rest.chars().next().unwrap_or_default();
    let right = OptionRight::from_flag(flag)
        .ok_or_else(|| ViewerError::parse(symbol, format!("unknown put/call flag '{flag}'")))?;

    let strike_part = &rest[1..];
    let strike = Decimal::from_str(strike_part).map_err(|e| {
        ViewerError::parse(symbol, format!("invalid strike '{strike_part}': {e}"))
    })?;

    Ok(ParsedSymbol {
        expiry,
        right,
        strike,
    })
}
