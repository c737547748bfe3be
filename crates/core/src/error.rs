//! Error types for the viewer pipeline.

use thiserror::Error;

/// Errors raised by the position pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// An encoded option symbol (or one of its subfields) failed to parse.
    #[error("parse error in symbol '{symbol}': {reason}")]
    Parse {
        /// The offending encoded symbol.
        symbol: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The quote or position source was unreachable or returned a bad response.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A required ticker was absent from the quote response.
    #[error("missing quote for ticker '{ticker}'")]
    MissingQuote {
        /// The ticker the quote source failed to price.
        ticker: String,
    },

    /// A derived field could not be computed (e.g. zero spot divisor).
    #[error("computation error: {0}")]
    Computation(String),

    /// A fetch exceeded its configured bound.
    #[error("fetch timed out: {0}")]
    Timeout(String),
}

impl ViewerError {
    /// Creates a parse error for the given symbol.
    pub fn parse(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates a missing-quote error.
    pub fn missing_quote(ticker: impl Into<String>) -> Self {
        Self::MissingQuote {
            ticker: ticker.into(),
        }
    }

    /// Creates a computation error.
    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// True when the error invalidates a single refresh tick only and the
    /// loop may keep running; parse failures poison the whole session.
    #[must_use]
    pub fn is_tick_scoped(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }
}

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
