//! TD Ameritrade brokerage integration.
//!
//! Implements the core `MarketDataSource` capability against the TD REST
//! API: the positions endpoint once at session start, the quotes endpoint
//! on every refresh tick. Session/OAuth setup is out of scope — the
//! client is handed a ready access token.

pub mod client;
pub mod types;

pub use client::{TdClient, TdClientConfig, TD_PROD_URL};
