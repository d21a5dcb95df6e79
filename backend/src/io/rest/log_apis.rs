//! # REST API for Habit Logs
//!
//! Endpoints for listing log entries and toggling a habit's completion for a
//! day. The toggle is keyed on the (habit, user, day) triple so a flip always
//! lands on the server's current state, even when the caller's view is stale.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use super::mappers::LogMapper;
use super::{authenticate, error_response};
use crate::domain::models::ToggleOutcome;
use crate::AppState;
use shared::{ToggleLogRequest, ToggleLogResponse};

/// Create a router for habit log APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs))
        .route("/toggle", post(toggle_log))
}

/// List every log of the caller together with its habit
async fn list_logs(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/logs");

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    match state.log_service.list_logs(&user.id).await {
        Ok(entries) => (StatusCode::OK, Json(LogMapper::to_log_list_dto(entries))).into_response(),
        Err(e) => {
            error!("Failed to list logs: {}", e);
            error_response(e)
        }
    }
}

/// Flip a habit's completion for one day
async fn toggle_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ToggleLogRequest>,
) -> impl IntoResponse {
    info!("POST /api/logs/toggle - request: {:?}", request);

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    let date = request.date.clone();
    match state.log_service.toggle_log(&user.id, request).await {
        Ok(outcome) => {
            let success_message = match &outcome {
                ToggleOutcome::Logged(_) => format!("Habit logged for {}.", date),
                ToggleOutcome::Cleared { .. } => format!("Log cleared for {}.", date),
            };
            (
                StatusCode::OK,
                Json(ToggleLogResponse {
                    outcome: LogMapper::to_outcome_dto(outcome),
                    success_message,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to toggle log: {}", e);
            error_response(e)
        }
    }
}
