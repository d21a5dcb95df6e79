//! # Domain Module
//!
//! Contains all business logic for the habit tracker application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how accounts, habits, and daily logs are modeled and managed.
//! It operates independently of any specific transport or storage mechanism.
//!
//! ## Module Organization
//!
//! - **auth_service**: Accounts, password verification, and bearer-token sessions
//! - **habit_service**: Habit CRUD operations and validation
//! - **log_service**: Daily log entries and the day-toggle flow
//! - **calendar**: Month grid generation and date calculations
//! - **models**: Domain entities shared across the services
//! - **error**: The error type every service operation returns
//!
//! ## Key Responsibilities
//!
//! - **Identity**: Resolving tokens to users; every operation below this layer
//!   takes the acting user's ID as an explicit parameter
//! - **Habit Management**: Creating, listing, and deleting habits with their logs
//! - **Log Toggling**: Flipping a habit's completion for a day, keyed on the
//!   (habit, user, day) triple rather than on client-supplied log IDs
//! - **Calendar Views**: Building Sunday-start month grids of whole weeks
//!
//! ## Business Rules
//!
//! - Habits and logs are always scoped to their owning user
//! - A habit has at most one log per day; duplicates are a consistency fault
//! - Day keys are YYYY-MM-DD strings, stored canonically as UTC midnight
//! - Deleting a habit removes all of its logs in the same transaction

pub mod auth_service;
pub mod calendar;
pub mod error;
pub mod habit_service;
pub mod log_service;
pub mod models;

pub use auth_service::*;
pub use calendar::*;
pub use error::*;
pub use habit_service::*;
pub use log_service::*;
