//! Domain model types, kept separate from the wire DTOs in `shared`.
//!
//! Models carry properly typed dates (`chrono::DateTime<Utc>`, or the `time`
//! crate for session stamps); the io layer maps them to the string-based
//! DTOs at the REST boundary.

pub mod user;
pub mod habit;
pub mod habit_log;
pub mod session;

pub use user::User;
pub use habit::Habit;
pub use habit_log::{HabitLog, ToggleOutcome};
pub use session::Session;
