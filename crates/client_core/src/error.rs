//! Failure taxonomy of a submission.

use std::time::Duration;

use shared::error::SemanticError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("姓名を入力してください")]
    MissingName,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid scorer endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },
    #[error("サーバーエラーが発生しました (HTTP {status})")]
    Status { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a submission is already in flight")]
    Busy,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}
