//! One-shot position bootstrap.

use std::collections::BTreeSet;

use tracing::info;

use optviewer_core::parser;
use optviewer_core::{MarketDataSource, PositionRecord, Result};

/// Immutable per-run state: the parsed position set and its distinct
/// tickers. Built once at startup and never mutated; the scheduler only
/// ever reads it. Positions are not re-polled during a run.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<PositionRecord>,
    tickers: BTreeSet<String>,
}

impl Session {
    /// Fetches the raw position payload and parses it. Called once per
    /// run.
    ///
    /// # Errors
    ///
    /// `Fetch` if the source is unreachable, `Parse` if the payload
    /// contains a malformed option symbol.
    pub async fn bootstrap(source: &dyn MarketDataSource) -> Result<Self> {
        let raw = source.fetch_positions().await?;
        let parsed = parser::parse_positions(&raw)?;
        info!(
            positions = parsed.records.len(),
            tickers = parsed.tickers.len(),
            "Session bootstrapped"
        );
        Ok(Self {
            records: parsed.records,
            tickers: parsed.tickers,
        })
    }

    /// Builds a session from already-parsed records (tests, replays).
    #[must_use]
    pub fn from_records(records: Vec<PositionRecord>) -> Self {
        let tickers = records.iter().map(|r| r.ticker.clone()).collect();
        Self { records, tickers }
    }

    #[must_use]
    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    #[must_use]
    pub fn tickers(&self) -> &BTreeSet<String> {
        &self.tickers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use optviewer_core::{RawPosition, ViewerError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    struct StaticSource {
        raw: Vec<RawPosition>,
    }

    #[async_trait]
    impl MarketDataSource for StaticSource {
        async fn fetch_positions(&self) -> Result<Vec<RawPosition>> {
            Ok(self.raw.clone())
        }

        async fn fetch_quotes(
            &self,
            _tickers: &BTreeSet<String>,
        ) -> Result<HashMap<String, Decimal>> {
            Err(ViewerError::fetch("not used"))
        }
    }

    fn raw_option(symbol: &str, underlying: &str) -> RawPosition {
        RawPosition {
            short_quantity: dec!(1),
            long_quantity: dec!(0),
            asset_type: "OPTION".to_string(),
            underlying_symbol: underlying.to_string(),
            symbol: symbol.to_string(),
            put_call: "PUT".to_string(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_parses_and_collects_tickers() {
        let source = StaticSource {
            raw: vec![
                raw_option("MSFT_021624P290", "MSFT"),
                raw_option("AAPL_011224P150", "AAPL"),
            ],
        };
        let session = Session::bootstrap(&source).await.unwrap();
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.tickers().len(), 2);
        assert!(session.tickers().contains("AAPL"));
        assert!(!session.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_fails_fast_on_malformed_symbol() {
        let source = StaticSource {
            raw: vec![raw_option("AAPLNOUNDERSCORE150", "AAPL")],
        };
        let err = Session::bootstrap(&source).await.unwrap_err();
        assert!(matches!(err, ViewerError::Parse { .. }));
    }
}
