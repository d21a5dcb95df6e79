use thiserror::Error;

use shared::{ApiError, ApiErrorKind};

/// Errors surfaced by the API client and the dashboard state.
///
/// Server-reported errors keep their kind so callers can branch on it;
/// anything that never reached the server is a `Transport` error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not authorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ConsistencyFault(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.to_string())
    }
}

impl From<ApiError> for ClientError {
    fn from(error: ApiError) -> Self {
        match error.kind {
            ApiErrorKind::Unauthorized => ClientError::Unauthorized,
            ApiErrorKind::NotFound => ClientError::NotFound(error.message),
            ApiErrorKind::Validation => ClientError::Validation(error.message),
            ApiErrorKind::ConsistencyFault => ClientError::ConsistencyFault(error.message),
            ApiErrorKind::Internal => ClientError::Server(error.message),
        }
    }
}
