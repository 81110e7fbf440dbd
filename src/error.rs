//! Error taxonomy for quote operations
//!
//! None of these are fatal: every failure leaves the collection as it was and
//! the server keeps answering requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// User-supplied text or category empty after trimming
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import document or remote response is not the expected JSON shape
    #[error("Format error: {0}")]
    Format(String),

    /// Remote call failed, returned a non-success status, or timed out
    #[error("Remote error: {0}")]
    Remote(String),

    /// Durable storage could not be written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl QuoteError {
    /// Whether the caller can fix this by changing its input
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuoteError::Validation(_) | QuoteError::Format(_))
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuoteError::Remote(format!("request timed out: {}", err))
        } else if err.is_decode() {
            QuoteError::Format(format!("remote response is not valid JSON: {}", err))
        } else {
            QuoteError::Remote(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
