use std::sync::Arc;

use thiserror::Error;

/// Transport-level failures.
///
/// Cloneable so a failed response can be shared between a middleware and the
/// caller that issued the request.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("HTTP request error: {0}")]
    Reqwest(Arc<reqwest::Error>),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response decode error: {0}")]
    Decode(String),
}

/// ByteDance SDK error types
///
/// API-level error codes (`err_no`, `error_code`, `code`, ...) are not
/// errors from the SDK's point of view: they come back inside the response
/// model. Use [`ApiResponse::check`](crate::types::ApiResponse::check) to turn
/// them into [`ByteDanceError::Api`] when that is more convenient.
#[derive(Debug, Error)]
pub enum ByteDanceError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ByteDance API error (code={code}): {message}")]
    Api { code: i64, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Signature error: {0}")]
    Signature(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ByteDanceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ByteDanceError::Http(HttpError::Decode(error.to_string()))
        } else {
            ByteDanceError::Http(HttpError::Reqwest(Arc::new(error)))
        }
    }
}

impl ByteDanceError {
    pub(crate) fn check_api(code: i64, message: &str) -> Result<(), ByteDanceError> {
        if code != 0 {
            return Err(ByteDanceError::Api {
                code,
                message: message.to_string(),
            });
        }
        Ok(())
    }

    /// Fails with [`ByteDanceError::InvalidArgument`] when `value` is empty.
    pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), ByteDanceError> {
        if value.trim().is_empty() {
            return Err(ByteDanceError::InvalidArgument(format!(
                "{name} must not be empty"
            )));
        }
        Ok(())
    }
}
