//! Unified error types.

use thiserror::Error;

/// Top-level error for gateway and store operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SyncError {
    /// HTTP status code behind this error, when the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// `true` for 429 / 403 responses.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SyncError::Http(HttpError::RateLimited { .. }))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Http(HttpError::from(e))
    }
}

/// HTTP-layer errors (the "network error" class).
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// 429 Too Many Requests or 403 Forbidden.
    #[error("Rate limited or forbidden (status {status})")]
    RateLimited { status: u16 },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Timeout")]
    Timeout,
}

impl HttpError {
    /// Map a non-2xx status to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            403 | 429 => HttpError::RateLimited { status },
            _ => HttpError::ServerError { status, body },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            HttpError::RateLimited { status } => Some(*status),
            HttpError::ServerError { status, .. } => Some(*status),
            HttpError::Timeout => None,
        }
    }
}
