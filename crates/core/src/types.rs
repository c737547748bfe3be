//! Data model for the position pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a position is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
        }
    }
}

/// Put or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionRight {
    Put,
    Call,
}

impl OptionRight {
    /// Decodes the one-character flag used in encoded option symbols.
    #[must_use]
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'P' => Some(Self::Put),
            'C' => Some(Self::Call),
            _ => None,
        }
    }

    /// The one-character flag used in encoded option symbols.
    #[must_use]
    pub fn flag(&self) -> char {
        match self {
            Self::Put => 'P',
            Self::Call => 'C',
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Put => write!(f, "Put"),
            Self::Call => write!(f, "Call"),
        }
    }
}

/// Normalized raw position entry as returned by a position source,
/// before any validation or symbol decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPosition {
    pub short_quantity: Decimal,
    pub long_quantity: Decimal,
    pub asset_type: String,
    pub underlying_symbol: String,
    /// Encoded option symbol, e.g. `AAPL_011224P150`.
    pub symbol: String,
    pub put_call: String,
}

/// An open option position. Immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub side: Side,
    pub right: OptionRight,
    pub ticker: String,
    /// Open contract count; always positive, side carries the direction.
    pub quantity: Decimal,
    pub strike: Decimal,
    pub expiry: NaiveDate,
}

impl PositionRecord {
    /// Stable identifier for matching this position to a display slot
    /// across ticks, independent of row order or count.
    #[must_use]
    pub fn key(&self) -> RowKey {
        RowKey {
            ticker: self.ticker.clone(),
            strike: self.strike,
            right: self.right,
            expiry: self.expiry,
        }
    }
}

/// Stable display-slot key derived from the contract identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowKey {
    pub ticker: String,
    pub strike: Decimal,
    pub right: OptionRight,
    pub expiry: NaiveDate,
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.ticker,
            self.strike,
            self.right.flag(),
            self.expiry
        )
    }
}

/// Per-tick view of a position joined with its spot price. Recomputed
/// from scratch every refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub record: PositionRecord,
    /// Current last price of the underlying.
    pub spot: Decimal,
    pub in_the_money: bool,
    /// Signed distance to at-the-money, rounded to 2 decimal places.
    pub dist_to_atm: Decimal,
    /// `dist_to_atm / spot * 100`, rounded to 2 decimal places.
    pub pct_to_atm: Decimal,
}

/// Display-emphasis bucket. The sink decides what each tag looks like;
/// the pipeline never deals in colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Caution,
    Normal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Caution => write!(f, "caution"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// A fully computed row as handed to the display sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub key: RowKey,
    pub row: EnrichedRow,
    pub severity: Severity,
}
