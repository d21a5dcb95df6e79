//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the habit tracker application.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Bearer-token authentication for every protected endpoint
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for frontend integration
//! - Request logging and monitoring
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: RESTful HTTP interfaces for all operations
//! - **Authentication**: Resolving the Authorization header to a user and
//!   passing that user's ID explicitly into the domain layer
//! - **Error Handling**: Converting domain errors to proper HTTP responses
//! - **Serialization**: JSON request/response handling
//!
//! ## Design Principles
//!
//! - **REST Compliance**: Following RESTful design patterns
//! - **Error Transparency**: Structured error bodies with a machine-readable kind
//! - **Domain Separation**: Pure translation layer without business logic

// Module declarations
pub mod auth_apis;
pub mod calendar_apis;
pub mod habit_apis;
pub mod log_apis;
pub mod mappers;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::domain::models::User;
use crate::domain::DomainError;
use crate::AppState;
use shared::{ApiError, ApiErrorKind};

/// Resolve the request's bearer token to a user.
///
/// A missing or malformed Authorization header fails the same way as an
/// unknown token.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, DomainError> {
    let token = bearer_token(headers).ok_or(DomainError::Unauthorized)?;
    state.auth_service.authenticate(token).await
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Translate a domain error into an HTTP response with a structured body.
///
/// Storage errors never leak their details to the client; handlers log them
/// before calling this.
pub fn error_response(error: DomainError) -> Response {
    let (status, kind, message) = match &error {
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ApiErrorKind::Unauthorized,
            error.to_string(),
        ),
        DomainError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            ApiErrorKind::NotFound,
            error.to_string(),
        ),
        DomainError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            ApiErrorKind::Validation,
            error.to_string(),
        ),
        DomainError::ConsistencyFault(_) => (
            StatusCode::CONFLICT,
            ApiErrorKind::ConsistencyFault,
            error.to_string(),
        ),
        DomainError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorKind::Internal,
            "Internal server error".to_string(),
        ),
    };

    (status, Json(ApiError::new(kind, message))).into_response()
}
