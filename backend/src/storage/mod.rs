//! # Storage Module
//!
//! Handles all data persistence for the habit tracker.
//!
//! This module abstracts away the specific storage implementation and
//! provides a consistent interface for persisting and retrieving data. The
//! implementation could be swapped out without affecting the domain logic
//! or the REST layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving users, sessions, habits, and logs
//! - **Data Retrieval**: Loading stored data back into domain models
//! - **Connection Management**: Handling database connections and schema
//! - **Transaction Safety**: Atomic multi-row operations (habit deletion
//!   cascades to logs in one transaction)
//!
//! ## Current Implementation
//!
//! SQLite via SQLx with async queries; dates are stored as RFC 3339 text
//! and parsed into typed values at the row boundary.

pub mod sqlite;

// Re-export the main types that other modules need
pub use sqlite::DbConnection;
pub use sqlite::{
    UserRepository,
    SessionRepository,
    HabitRepository,
    HabitLogRepository,
};
