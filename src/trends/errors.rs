//! # Trends Errors
//!
//! Error types for the trends read path.

use thiserror::Error;

/// Result type for trends operations
pub type TrendsResult<T> = Result<T, TrendsError>;

/// Trends read path errors
#[derive(Debug, Clone, Error)]
pub enum TrendsError {
    /// Datastore endpoint unreachable or misconfigured
    #[error("{0}")]
    Connection(String),

    /// Query against the trends collection failed
    #[error("{0}")]
    Query(String),

    /// No record for the requested country code
    #[error("No trends data found for country {0}")]
    NotFound(String),

    /// Fixture file could not be read or parsed
    #[error("Malformed fixture: {0}")]
    MalformedFixture(String),
}

impl TrendsError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TrendsError::NotFound(_) => 404,
            TrendsError::Connection(_) => 500,
            TrendsError::Query(_) => 500,
            TrendsError::MalformedFixture(_) => 500,
        }
    }

    /// Returns whether this error was caused by the request rather than the backend
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<mongodb::error::Error> for TrendsError {
    fn from(err: mongodb::error::Error) -> Self {
        TrendsError::Query(err.to_string())
    }
}
