//! # SQLite Storage Module
//!
//! SQLite-backed persistence for the habit tracker.
//!
//! ## Components
//!
//! - **connection.rs** - database connection management and schema setup
//! - **repositories/** - per-entity repositories over the shared connection

pub mod connection;
pub mod repositories;

// Re-export the main types for external use
pub use connection::DbConnection;
pub use repositories::{
    UserRepository,
    SessionRepository,
    HabitRepository,
    HabitLogRepository,
};
