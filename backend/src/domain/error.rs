use thiserror::Error;

/// Errors produced by the domain services.
///
/// The REST layer maps each variant to a status code and a
/// `shared::ApiErrorKind`; repositories stay on `anyhow::Result` and their
/// failures surface here as `Storage`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ConsistencyFault(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        DomainError::ConsistencyFault(message.into())
    }
}
