//! # REST API for Accounts and Sessions
//!
//! Endpoints for signing up, signing in and out, and resolving the current
//! user from a bearer token.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use super::mappers::UserMapper;
use super::{authenticate, bearer_token, error_response};
use crate::domain::DomainError;
use crate::AppState;
use shared::{SignInRequest, SignOutResponse, SignUpRequest};

/// Create a router for account and session APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/me", get(current_user))
}

/// Create a new account and sign it in
async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> impl IntoResponse {
    // Log the email only; the request carries a password
    info!("POST /api/auth/signup - email: {}", request.email);

    match state.auth_service.sign_up(request).await {
        Ok((user, session)) => (
            StatusCode::CREATED,
            Json(UserMapper::to_session_response(user, session)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to sign up: {}", e);
            error_response(e)
        }
    }
}

/// Sign in to an existing account
async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/signin - email: {}", request.email);

    match state.auth_service.sign_in(request).await {
        Ok((user, session)) => (
            StatusCode::OK,
            Json(UserMapper::to_session_response(user, session)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Revoke the caller's session.
///
/// Revoking a token that is already dead is not an error; the outcome the
/// caller asked for holds either way.
async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("POST /api/auth/signout");

    let token = match bearer_token(&headers) {
        Some(token) => token,
        None => return error_response(DomainError::Unauthorized),
    };

    match state.auth_service.sign_out(token).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SignOutResponse {
                success_message: "Signed out successfully.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to sign out: {}", e);
            error_response(e)
        }
    }
}

/// Get the profile behind the caller's token
async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/auth/me");

    match authenticate(&state, &headers).await {
        Ok(user) => (
            StatusCode::OK,
            Json(UserMapper::to_current_user_response(user)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, initialize_test_backend};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    async fn sign_up_for_test(
        app: &Router,
        email: &str,
    ) -> Result<shared::SessionResponse, Box<dyn std::error::Error>> {
        let request_body = SignUpRequest {
            name: "Alice Smith".to_string(),
            email: email.to_string(),
            password: "sekret1".to_string(),
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signup")
                    .method(Method::POST)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request_body)?))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[tokio::test]
    async fn test_sign_up_and_current_user() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let session = sign_up_for_test(&app, "alice@example.com").await?;
        assert_eq!(session.user.email, "alice@example.com");
        assert!(!session.token.is_empty());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .method(Method::GET)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let current: shared::CurrentUserResponse = serde_json::from_slice(&body)?;
        assert_eq!(current.user.id, session.user.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_up_rejects_invalid_email() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let request_body = SignUpRequest {
            name: "Alice Smith".to_string(),
            email: "not-an-email".to_string(),
            password: "sekret1".to_string(),
        };

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signup")
                    .method(Method::POST)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request_body)?))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let error: shared::ApiError = serde_json::from_slice(&body)?;
        assert_eq!(error.kind, shared::ApiErrorKind::Validation);

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_rejects_wrong_password() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        sign_up_for_test(&app, "alice@example.com").await?;

        let request_body = SignInRequest {
            email: "alice@example.com".to_string(),
            password: "wrong-password".to_string(),
        };

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signin")
                    .method(Method::POST)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request_body)?))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let error: shared::ApiError = serde_json::from_slice(&body)?;
        assert_eq!(error.kind, shared::ApiErrorKind::Unauthorized);

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let session = sign_up_for_test(&app, "alice@example.com").await?;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/signout")
                    .method(Method::POST)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        // The token no longer resolves
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .method(Method::GET)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_current_user_requires_token() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
