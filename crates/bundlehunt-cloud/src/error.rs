//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error [{code}]: {message}")]
    ApiError { code: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Whether this error means the credentials were rejected
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, CloudError::AuthenticationFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
