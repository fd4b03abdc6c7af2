//! Tencent Cloud provider error types

use bundlehunt_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TencentError {
    #[error("Tencent Cloud API error [{code}]: {message} (RequestId: {request_id})")]
    Api {
        code: String,
        message: String,
        request_id: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TencentError {
    /// Vendor error code, if the API returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            TencentError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// `AuthFailure` and all of its sub-codes
    pub fn is_auth_failure(&self) -> bool {
        self.code().is_some_and(|c| c.starts_with("AuthFailure"))
    }
}

impl From<TencentError> for CloudError {
    fn from(err: TencentError) -> Self {
        if err.is_auth_failure() {
            return CloudError::AuthenticationFailed(err.to_string());
        }
        match err {
            TencentError::Api {
                code,
                message,
                request_id,
            } => CloudError::ApiError {
                code,
                message: format!("{} (RequestId: {})", message, request_id),
            },
            TencentError::Http(e) if e.is_timeout() => CloudError::Timeout(e.to_string()),
            TencentError::JsonError(e) => CloudError::Json(e),
            TencentError::InvalidEndpoint(e) => CloudError::InvalidConfig(e),
            other => CloudError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TencentError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str) -> TencentError {
        TencentError::Api {
            code: code.to_string(),
            message: "denied".to_string(),
            request_id: "req-1".to_string(),
        }
    }

    #[test]
    fn test_auth_failure_codes() {
        assert!(api_error("AuthFailure").is_auth_failure());
        assert!(api_error("AuthFailure.SignatureFailure").is_auth_failure());
        assert!(!api_error("ResourceInsufficient").is_auth_failure());
    }

    #[test]
    fn test_conversion_to_cloud_error() {
        let auth: CloudError = api_error("AuthFailure.SecretIdNotFound").into();
        assert!(auth.is_auth_failure());

        let api: CloudError = api_error("RequestLimitExceeded").into();
        match api {
            CloudError::ApiError { code, message } => {
                assert_eq!(code, "RequestLimitExceeded");
                assert!(message.contains("req-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
