//! Capability seams between the pipeline and its collaborators.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::types::{DisplayRow, RawPosition};

/// Brokerage capability the viewer requires: one position snapshot at
/// session start, then a quote lookup per refresh tick.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the raw position payload. Called once at session start.
    async fn fetch_positions(&self) -> Result<Vec<RawPosition>>;

    /// Fetches the last price for each requested ticker. Called every
    /// tick; every requested ticker must appear in the result.
    async fn fetch_quotes(&self, tickers: &BTreeSet<String>)
        -> Result<HashMap<String, Decimal>>;
}

/// Display capability. Receives the full, newly computed, ordered row set
/// once per successful tick and owns all rendering and styling.
#[async_trait]
pub trait DisplaySink: Send + Sync {
    async fn publish(&self, rows: &[DisplayRow]) -> Result<()>;
}
