//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Tushare returned a non-zero status code
    #[error("Tushare API error on {api} (code {code}): {msg}")]
    Api {
        /// API name that was queried
        api: String,
        /// Provider status code
        code: i64,
        /// Provider message
        msg: String,
    },

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// A column the caller relies on is absent from a frame
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// No API token configured
    #[error("Tushare token is not configured (use --token or TUSHARE_TOKEN)")]
    MissingToken,

    /// Failure injected by an in-memory source
    #[error("Injected failure on {endpoint} for {symbol}: {reason}")]
    Injected {
        /// Endpoint that failed
        endpoint: String,
        /// Symbol that was queried
        symbol: String,
        /// Configured reason
        reason: String,
    },
}
