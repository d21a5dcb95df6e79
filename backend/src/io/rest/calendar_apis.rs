//! # REST API for the Calendar View
//!
//! Serves the month grid the dashboard renders. The grid covers whole weeks,
//! so the log query range runs from the first leading day through the last
//! trailing day rather than just the month itself.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{error, info};

use super::mappers::LogMapper;
use super::{authenticate, error_response};
use crate::domain::DomainError;
use crate::AppState;
use shared::date_key;

// Query parameters for calendar month API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: u32,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/month", get(get_calendar_month))
}

/// Get calendar month data with the caller's habit logs
async fn get_calendar_month(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CalendarMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/month - query: {:?}", query);

    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    let invalid_month =
        || DomainError::validation(format!("Invalid calendar month: {}/{}", query.month, query.year));

    let grid = match state.calendar_service.month_grid(query.month, query.year) {
        Some(grid) => grid,
        None => return error_response(invalid_month()),
    };

    // The grid is never empty; its ends bound the log query
    let start = date_key::utc_midnight(grid[0]);
    let end = date_key::utc_midnight(grid[grid.len() - 1]);

    let logs = match state.log_service.logs_in_range(&user.id, start, end).await {
        Ok(logs) => logs,
        Err(e) => {
            error!("Failed to get logs for calendar: {}", e);
            return error_response(e);
        }
    };

    let logs = logs.into_iter().map(LogMapper::to_dto).collect();

    match state
        .calendar_service
        .generate_calendar_month(query.month, query.year, logs)
    {
        Some(calendar) => (StatusCode::OK, Json(calendar)).into_response(),
        None => error_response(invalid_month()),
    }
}
