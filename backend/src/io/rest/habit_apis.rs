//! # REST API for Habit Management
//!
//! Endpoints for creating, listing, and deleting habits. Every endpoint is
//! scoped to the authenticated caller; one user's habits are invisible to
//! another.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use super::mappers::HabitMapper;
use super::{authenticate, error_response};
use crate::AppState;
use shared::{CreateHabitRequest, DeleteHabitResponse};

/// Create a router for habit APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_habits).post(create_habit))
        .route("/:habit_id", axum::routing::delete(delete_habit))
}

/// List the caller's habits
async fn list_habits(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/habits");

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    match state.habit_service.list_habits(&user.id).await {
        Ok(habits) => (StatusCode::OK, Json(HabitMapper::to_habit_list_dto(habits))).into_response(),
        Err(e) => {
            error!("Failed to list habits: {}", e);
            error_response(e)
        }
    }
}

/// Create a new habit for the caller
async fn create_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateHabitRequest>,
) -> impl IntoResponse {
    info!("POST /api/habits - request: {:?}", request);

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    match state.habit_service.create_habit(&user.id, request).await {
        Ok(habit) => (
            StatusCode::CREATED,
            Json(HabitMapper::to_habit_response(
                habit,
                "Habit created successfully.",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create habit: {}", e);
            error_response(e)
        }
    }
}

/// Delete one of the caller's habits together with all of its logs
async fn delete_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Path(habit_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/habits/{}", habit_id);

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    match state.habit_service.delete_habit(&habit_id, &user.id).await {
        Ok((habit, removed_logs)) => (
            StatusCode::OK,
            Json(DeleteHabitResponse {
                habit_id: habit.id,
                removed_log_count: removed_logs as usize,
                success_message: "Habit and its logs have been deleted.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete habit: {}", e);
            error_response(e)
        }
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
    ) -> Result<shared::SessionResponse, Box<dyn std::error::Error>> {
        let request_body = shared::SignUpRequest {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
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

    async fn create_habit_for_test(
        app: &Router,
        token: &str,
        name: &str,
    ) -> Result<shared::HabitResponse, Box<dyn std::error::Error>> {
        let request_body = CreateHabitRequest {
            name: name.to_string(),
            color: "#f69fa9".to_string(),
            description: None,
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/habits")
                    .method(Method::POST)
                    .header("content-type", "application/json")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::from(serde_json::to_vec(&request_body)?))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[tokio::test]
    async fn test_create_and_list_habits() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let session = sign_up_for_test(&app).await?;
        let created = create_habit_for_test(&app, &session.token, "Morning run").await?;
        assert_eq!(created.habit.name, "Morning run");
        assert_eq!(created.habit.user_id, session.user.id);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/habits")
                    .method(Method::GET)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let list: shared::HabitListResponse = serde_json::from_slice(&body)?;
        assert_eq!(list.habits.len(), 1);
        assert_eq!(list.habits[0].id, created.habit.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_requires_token() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let request_body = CreateHabitRequest {
            name: "Morning run".to_string(),
            color: "#f69fa9".to_string(),
            description: None,
        };

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/habits")
                    .method(Method::POST)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request_body)?))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_habit_removes_logs() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let session = sign_up_for_test(&app).await?;
        let created = create_habit_for_test(&app, &session.token, "Morning run").await?;

        // Log the habit on two days
        for date in ["2024-03-10", "2024-03-11"] {
            let request_body = shared::ToggleLogRequest {
                habit_id: created.habit.id.clone(),
                date: date.to_string(),
                notes: None,
            };
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/logs/toggle")
                        .method(Method::POST)
                        .header("content-type", "application/json")
                        .header("authorization", format!("Bearer {}", session.token))
                        .body(Body::from(serde_json::to_vec(&request_body)?))?,
                )
                .await?;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/habits/{}", created.habit.id))
                    .method(Method::DELETE)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let deleted: DeleteHabitResponse = serde_json::from_slice(&body)?;
        assert_eq!(deleted.habit_id, created.habit.id);
        assert_eq!(deleted.removed_log_count, 2);

        // The logs went with the habit
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/logs")
                    .method(Method::GET)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let logs: shared::LogListResponse = serde_json::from_slice(&body)?;
        assert!(logs.entries.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_habit() -> Result<(), Box<dyn std::error::Error>> {
        let app_state = initialize_test_backend().await?;
        let app = create_router(app_state);

        let session = sign_up_for_test(&app).await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/habits/habit::999")
                    .method(Method::DELETE)
                    .header("authorization", format!("Bearer {}", session.token))
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let error: shared::ApiError = serde_json::from_slice(&body)?;
        assert_eq!(error.kind, shared::ApiErrorKind::NotFound);

        Ok(())
    }
}
