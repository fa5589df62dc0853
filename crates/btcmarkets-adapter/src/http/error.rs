/*
[INPUT]:  Error sources (HTTP transport, exchange responses, credentials)
[OUTPUT]: Structured error types with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the BTC Markets adapter
#[derive(Error, Debug)]
pub enum BtcMarketsError {
    /// API secret could not be decoded at load time
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// Transport exceeded the per-call deadline
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// Response body was not parseable as the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Exchange answered with a 4xx/5xx status
    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// Exchange reported the request rate was exceeded
    #[error("Rate limited by the exchange")]
    RateLimited,

    /// Lookup miss in a list-returning endpoint
    #[error("No entry found for {key}")]
    NotFound { key: String },

    /// Trade aggregation produced an empty result set
    #[error("No trades found for {symbol}")]
    NoTradesFound { symbol: String },

    /// HTTP request failed below the status-code level
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Request body serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BtcMarketsError {
    /// Check if the error is worth retrying with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BtcMarketsError::Timeout { .. }
                | BtcMarketsError::RateLimited
                | BtcMarketsError::RequestFailed { .. }
                | BtcMarketsError::Http(_)
        )
    }

    /// Check if the exchange reported a rate-limit condition
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, BtcMarketsError::RateLimited)
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, BtcMarketsError>;
