//! Filter client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// Backend answered with a non-success status
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Request never completed: connection refused, timeout, TLS
    #[error("Network error: {0}")]
    Network(String),

    /// Body was not a JSON array of strings
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),
}

impl FilterError {
    /// Failures the dashboard shows as its fixed error message.
    ///
    /// Everything else is a programming or contract error and goes back to
    /// the caller untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FilterError::Status(_) | FilterError::Network(_))
    }
}

impl From<reqwest::Error> for FilterError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FilterError::Status(status.as_u16()),
            None => FilterError::Network(err.to_string()),
        }
    }
}
