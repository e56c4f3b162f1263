use thiserror::Error;

use crate::ApiMessage;

/// Failure of a single user action against the budget API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// A lookup returned no matching resource
    #[error("{0} not found")]
    NotFound(String),

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A 2xx response whose body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from the raw response body.
    ///
    /// Uses the `message` of the backend's error envelope when the body is one,
    /// otherwise the body text itself.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "Unknown error".to_string()
                } else {
                    trimmed.to_string()
                }
            });
        ApiError::Status { status, message }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_) | ApiError::Status { status: 404, .. })
    }
}
