//! # Habit Tracker Backend
//!
//! Contains all server-side logic for the habit tracker application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for habits, logs, and sessions
//! - **Storage**: Data persistence mechanisms (SQLite via SQLx)
//! - **IO**: Interface layer that exposes functionality over HTTP
//!
//! The backend is client-agnostic; the bundled CLI frontend and any browser
//! frontend speak to it through the same REST API.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Client Layer (CLI, browser)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Database, persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with proper CORS configuration
//! - Coordinate between domain logic and data persistence

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::domain::{AuthService, CalendarService, HabitService, LogService};
use crate::storage::{
    DbConnection, HabitLogRepository, HabitRepository, SessionRepository, UserRepository,
};

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub habit_service: HabitService,
    pub log_service: LogService,
    pub calendar_service: CalendarService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    Ok(build_state(db, config.session_ttl_days))
}

/// Wire the services over an open database connection
fn build_state(db: DbConnection, session_ttl_days: i64) -> AppState {
    info!("Setting up domain services");
    let users = UserRepository::new(db.clone());
    let sessions = SessionRepository::new(db.clone());
    let habits = HabitRepository::new(db.clone());
    let logs = HabitLogRepository::new(db);

    AppState {
        auth_service: AuthService::new(users, sessions, session_ttl_days),
        habit_service: HabitService::new(habits.clone()),
        log_service: LogService::new(logs, habits),
        calendar_service: CalendarService::new(),
    }
}

/// Backend over a fresh in-memory database, for API tests
#[cfg(test)]
pub(crate) async fn initialize_test_backend() -> Result<AppState> {
    let db = DbConnection::init_test().await?;
    Ok(build_state(db, 30))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup for browser frontends. Auth is bearer-token based, so no
    // credentialed origins are involved.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .nest("/auth", io::rest::auth_apis::router())
        .nest("/habits", io::rest::habit_apis::router())
        .nest("/logs", io::rest::log_apis::router())
        .nest("/calendar", io::rest::calendar_apis::router());

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
