//! SDK error types using thiserror 2.0.

use thiserror::Error;

/// Errors returned by Secrets Manager clients.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Access token could not be parsed
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    /// Identity server rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Requested object does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Machine account lacks access to the object
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Any other non-success API response
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message returned by the server
        message: String,
    },

    /// Server could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Object id that cannot address a single object
    #[error("Invalid object id: {0:?}")]
    InvalidId(String),
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an invalid access token error.
    #[must_use]
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidAccessToken(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdkError::unavailable("connection refused");
        assert_eq!(err.to_string(), "Service unavailable: connection refused");

        let err = SdkError::Api {
            status: 400,
            message: "Name is required".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 400): Name is required");
    }

    #[test]
    fn test_not_found_display() {
        let err = SdkError::not_found("project 42");
        assert_eq!(err.to_string(), "Resource not found: project 42");
    }
}
