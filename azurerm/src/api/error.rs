use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("API returned error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed")]
    Auth,

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid resource ID {id:?}: {reason}")]
    InvalidResourceId { id: String, reason: String },

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Operation {url} finished as {status}")]
    OperationFailed { url: String, status: String },

    #[error("Operation {url} did not complete within {seconds}s")]
    OperationTimeout { url: String, seconds: u64 },

    #[error("Operation response is missing a polling URL")]
    MissingOperationUrl,
}

impl ApiError {
    /// Not-found is a successful probe outcome, never a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}
