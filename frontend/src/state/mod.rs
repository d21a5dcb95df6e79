//! # State Module
//!
//! Client-side state for the habit dashboard. Everything here is plain
//! in-memory data; server traffic stays behind the `HabitGateway` seam.

pub mod dashboard;
pub mod log_store;

pub use dashboard::{DashboardState, ToggleResult};
pub use log_store::HabitLogStore;
