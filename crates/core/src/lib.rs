//! Core data pipeline for the option position viewer.
//!
//! Turns raw brokerage position payloads into a normalized model, joins
//! spot quotes onto it, derives moneyness fields, imposes a deterministic
//! row order, and buckets rows by severity. Transport and rendering stay
//! behind the capability traits in [`traits`] — nothing in this crate
//! touches the network or a screen.

pub mod config;
pub mod config_loader;
pub mod enrich;
pub mod error;
pub mod order;
pub mod parser;
pub mod pipeline;
pub mod severity;
pub mod symbol;
pub mod traits;
pub mod types;

pub use config::{AppConfig, FaultPolicy, TdSettings, ViewerConfig};
pub use config_loader::ConfigLoader;
pub use error::{Result, ViewerError};
pub use pipeline::compute_display_rows;
pub use traits::{DisplaySink, MarketDataSource};
pub use types::{
    DisplayRow, EnrichedRow, OptionRight, PositionRecord, RawPosition, RowKey, Severity, Side,
};
