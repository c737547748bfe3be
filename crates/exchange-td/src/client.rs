//! TD Ameritrade REST client.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use optviewer_core::{MarketDataSource, RawPosition, Result, ViewerError};

use crate::types::{AccountEnvelope, TdQuote};

/// TD Ameritrade production API base URL.
pub const TD_PROD_URL: &str = "https://api.tdameritrade.com/v1";

/// Configuration for the TD client.
#[derive(Debug)]
pub struct TdClientConfig {
    /// Base URL for the API; overridable for tests.
    pub base_url: String,

    /// OAuth access token.
    pub access_token: SecretString,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TdClientConfig {
    /// Creates a production configuration with the given access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: TD_PROD_URL.to_string(),
            access_token: SecretString::from(access_token.into()),
            timeout_secs: 10,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Typed client for the two TD endpoints the viewer needs.
pub struct TdClient {
    config: TdClientConfig,
    http: Client,
}

impl TdClient {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: TdClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ViewerError::fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path_and_query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ViewerError::fetch(format!("{status} from {url}: {body}")));
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ViewerError {
    if err.is_timeout() {
        ViewerError::timeout(err.to_string())
    } else {
        ViewerError::fetch(err.to_string())
    }
}

#[async_trait]
impl MarketDataSource for TdClient {
    async fn fetch_positions(&self) -> Result<Vec<RawPosition>> {
        let accounts: Vec<AccountEnvelope> = self.get_json("/accounts?fields=positions").await?;

        // Single-account setup: the first account is the one we trade in.
        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| ViewerError::fetch("no accounts in positions response"))?;

        let positions: Vec<RawPosition> = account
            .securities_account
            .positions
            .into_iter()
            .map(Into::into)
            .collect();

        info!(count = positions.len(), "Fetched account positions");
        Ok(positions)
    }

    async fn fetch_quotes(
        &self,
        tickers: &BTreeSet<String>,
    ) -> Result<HashMap<String, Decimal>> {
        if tickers.is_empty() {
            return Ok(HashMap::new());
        }

        let symbols = tickers.iter().cloned().collect::<Vec<_>>().join(",");
        let quotes: HashMap<String, TdQuote> = self
            .get_json(&format!("/marketdata/quotes?symbol={symbols}"))
            .await?;

        debug!(
            requested = tickers.len(),
            received = quotes.len(),
            "Fetched quotes"
        );
        Ok(quotes
            .into_iter()
            .map(|(ticker, quote)| (ticker, quote.last_price))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TdClient {
        let config = TdClientConfig::new("test-token")
            .with_base_url(server.uri())
            .with_timeout_secs(2);
        TdClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_positions_converts_first_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .and(query_param("fields", "positions"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{
                    "securitiesAccount": {
                        "type": "MARGIN",
                        "positions": [
                            {
                                "shortQuantity": 2,
                                "longQuantity": 0,
                                "instrument": {
                                    "assetType": "OPTION",
                                    "symbol": "AAPL_011224P150",
                                    "underlyingSymbol": "AAPL",
                                    "putCall": "PUT"
                                }
                            },
                            {
                                "shortQuantity": 0,
                                "longQuantity": 100,
                                "instrument": {
                                    "assetType": "EQUITY",
                                    "symbol": "AAPL"
                                }
                            }
                        ]
                    }
                }]"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let positions = test_client(&server).fetch_positions().await.unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "AAPL_011224P150");
        assert_eq!(positions[0].short_quantity, dec!(2));
        assert_eq!(positions[1].asset_type, "EQUITY");
    }

    #[tokio::test]
    async fn test_fetch_positions_with_no_accounts_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .mount(&server)
            .await;

        let err = test_client(&server).fetch_positions().await.unwrap_err();
        assert!(matches!(err, ViewerError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_quotes_maps_last_prices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketdata/quotes"))
            .and(query_param("symbol", "AAPL,MSFT"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{
                    "AAPL": {"assetType": "EQUITY", "lastPrice": 148.00},
                    "MSFT": {"assetType": "EQUITY", "lastPrice": 295.00}
                }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let tickers: BTreeSet<String> = ["AAPL", "MSFT"].iter().map(ToString::to_string).collect();
        let quotes = test_client(&server).fetch_quotes(&tickers).await.unwrap();
        assert_eq!(quotes.get("AAPL"), Some(&dec!(148.00)));
        assert_eq!(quotes.get("MSFT"), Some(&dec!(295.00)));
    }

    #[tokio::test]
    async fn test_empty_ticker_set_skips_the_request() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 into a fetch error.
        let quotes = test_client(&server)
            .fetch_quotes(&BTreeSet::new())
            .await
            .unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/marketdata/quotes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let tickers: BTreeSet<String> = std::iter::once("AAPL".to_string()).collect();
        let err = test_client(&server).fetch_quotes(&tickers).await.unwrap_err();
        assert!(matches!(err, ViewerError::Fetch(_)));
        assert!(err.to_string().contains("500"));
    }
}
