//! Error types for the Gate client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Gate client
///
/// A non-success status code is not an error at this layer: it is returned
/// in [`ApiResponse`](crate::ApiResponse) so callers can classify it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a usable response was obtained
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The client could not be built from the supplied connection settings
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create a configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Check if the request never produced a response (refused, timed out, TLS)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = ClientError::invalid_config("bad endpoint");
        assert_eq!(err.to_string(), "Invalid client configuration: bad endpoint");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_parse_error_is_not_transport() {
        let err = ClientError::ParseError("expected value at line 1".to_string());
        assert!(!err.is_transport());
    }
}
