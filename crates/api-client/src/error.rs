//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
///
/// `Input` and `Precondition` are raised before any request is sent; every
/// other variant means a request was attempted.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Required local input is missing (no file, no name)
    #[error("{0}")]
    Input(String),

    /// No active session identifier
    #[error("{0}")]
    Precondition(String),

    /// Image or watermark upload rejected by the service
    #[error("{message} ({status})")]
    Upload {
        /// HTTP status code
        status: u16,
        /// Backend error text, or a generic message
        message: String,
    },

    /// Resize rejected by the service
    #[error("Error resizing the image ({status}): {message}")]
    Resize {
        /// HTTP status code
        status: u16,
        /// Backend error text, or a generic message
        message: String,
    },

    /// Watermark application rejected by the service
    #[error("Error applying watermark ({status}): {message}")]
    Watermark {
        /// HTTP status code
        status: u16,
        /// Backend error text, or a generic message
        message: String,
    },

    /// Artifact retrieval rejected by the service
    #[error("Error fetching the image ({status}): {message}")]
    Fetch {
        /// HTTP status code
        status: u16,
        /// Backend error text, or a generic message
        message: String,
    },

    /// Success response missing an expected field
    #[error("Malformed response: {0}")]
    Protocol(String),

    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Session store could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] pixmark_core::Error),
}

impl ApiError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the error was raised before any request was sent
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Precondition(_))
    }

    /// HTTP status of a rejected request, if this error carries one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upload { status, .. }
            | Self::Resize { status, .. }
            | Self::Watermark { status, .. }
            | Self::Fetch { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors() {
        assert!(ApiError::input("Please select an image").is_local());
        assert!(ApiError::precondition("No image ID found").is_local());
        assert!(!ApiError::protocol("missing imageID").is_local());
    }

    #[test]
    fn test_status_classification() {
        let err = ApiError::Resize {
            status: 400,
            message: "bad size".to_string(),
        };
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.to_string().contains("bad size"));

        let err = ApiError::Fetch {
            status: 500,
            message: "Error fetching the image".to_string(),
        };
        assert!(err.is_server_error());
        assert_eq!(ApiError::input("x").status(), None);
    }
}
