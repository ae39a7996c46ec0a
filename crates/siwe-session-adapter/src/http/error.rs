/*
[INPUT]:  Error sources (HTTP, backend status, serialization, message, signing)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::MessageError;

/// Main error type for the SIWE session adapter
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SIWE message could not be built
    #[error("Invalid SIWE message: {0}")]
    Message(#[from] MessageError),

    /// Wallet failed to sign
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Chain id is not part of the wallet configuration
    #[error("Chain {chain_id} is not configured")]
    UnsupportedChain { chain_id: u64 },
}

impl SessionError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Http(_) | SessionError::InvalidResponse(_) => true,
            SessionError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Check if error indicates the backend rejected the session
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SessionError::Api { code: 401 | 403, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        SessionError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
