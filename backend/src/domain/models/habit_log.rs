use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day's completion record for a habit.
///
/// `date` is always UTC midnight of the logged day; that canonical form is
/// what the toggle lookup matches on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What a toggle did to the stored state
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// No log existed for the day, so one was created
    Logged(HabitLog),
    /// A log existed for the day, so it was removed
    Cleared { log_id: String },
}
