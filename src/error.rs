use crate::models::ErrorPayload;
use thiserror::Error;

/// Alfresco client error types
#[derive(Error, Debug)]
pub enum AlfrescoError {
    /// No usable response: connect, DNS, timeout or body read failure
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The server answered with a non-success status
    #[error("Server error: {status} - {payload}")]
    Server { status: u16, payload: ErrorPayload },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Alfresco operations
pub type AlfrescoResult<T> = Result<T, AlfrescoError>;

impl AlfrescoError {
    /// Create a server error from a status code and decoded payload
    pub fn server_error(status: u16, payload: ErrorPayload) -> Self {
        Self::Server { status, payload }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// HTTP status of a server error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The server's error body, when the server answered
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Server { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
