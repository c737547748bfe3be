//! Serde mirrors of the TD Ameritrade payloads the viewer consumes.

use rust_decimal::Decimal;
use serde::Deserialize;

use optviewer_core::RawPosition;

/// One entry of the `GET /accounts?fields=positions` response array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEnvelope {
    pub securities_account: SecuritiesAccount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritiesAccount {
    /// Absent when the account holds nothing.
    #[serde(default)]
    pub positions: Vec<TdPosition>,
}

/// A raw position entry inside a securities account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdPosition {
    #[serde(default)]
    pub short_quantity: Decimal,
    #[serde(default)]
    pub long_quantity: Decimal,
    pub instrument: TdInstrument,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdInstrument {
    pub asset_type: String,
    /// Only present on option instruments.
    #[serde(default)]
    pub underlying_symbol: String,
    pub symbol: String,
    #[serde(default)]
    pub put_call: String,
}

/// Quote entry from `GET /marketdata/quotes`; only the last price matters
/// to the viewer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TdQuote {
    pub last_price: Decimal,
}

impl From<TdPosition> for RawPosition {
    fn from(pos: TdPosition) -> Self {
        Self {
            short_quantity: pos.short_quantity,
            long_quantity: pos.long_quantity,
            asset_type: pos.instrument.asset_type,
            underlying_symbol: pos.instrument.underlying_symbol,
            symbol: pos.instrument.symbol,
            put_call: pos.instrument.put_call,
        }
    }
}
