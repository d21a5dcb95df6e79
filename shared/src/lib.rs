use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::Datelike;

pub mod date_key;

/// Public profile of a signed-in user (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A habit being tracked by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    /// ID of the user this habit belongs to
    pub user_id: String,
    /// Display name of the habit (max 100 characters)
    pub name: String,
    /// Display color for calendar rendering (e.g. "#f69fa9")
    pub color: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A single day's completion record for a habit.
///
/// Presence of a log means the habit was done that day; there is never
/// more than one log per habit per day. Logs are created and deleted,
/// never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    /// Day key in YYYY-MM-DD format
    pub date: String,
    /// Optional note attached when the day was logged
    pub notes: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Request to create a new account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to sign in to an existing account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response after a successful sign-up or sign-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionResponse {
    /// Bearer token to present on subsequent requests
    pub token: String,
    pub user: UserProfile,
}

/// Response after signing out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignOutResponse {
    pub success_message: String,
}

/// Response carrying the currently authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUserResponse {
    pub user: UserProfile,
}

/// Request for creating a new habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateHabitRequest {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

/// Response after creating a habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitResponse {
    pub habit: Habit,
    pub success_message: String,
}

/// Response containing a user's habits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitListResponse {
    pub habits: Vec<Habit>,
}

/// Response after deleting a habit and its logs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteHabitResponse {
    pub habit_id: String,
    /// Number of logs removed along with the habit
    pub removed_log_count: usize,
    pub success_message: String,
}

/// Request to flip a habit's completion state for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToggleLogRequest {
    pub habit_id: String,
    /// Day key in YYYY-MM-DD format
    pub date: String,
    /// Optional note, stored only when the toggle creates a log
    pub notes: Option<String>,
}

/// What a toggle did on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    /// The day was not logged; a log was created
    Logged(HabitLog),
    /// The day was already logged; the log was removed
    Cleared { log_id: String },
}

/// Response after toggling a habit log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToggleLogResponse {
    pub outcome: ToggleOutcome,
    pub success_message: String,
}

/// A log joined with the habit it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub log: HabitLog,
    pub habit: Habit,
}

/// Response containing all of a user's logs with their habits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogListResponse {
    pub entries: Vec<LogEntry>,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Day from the previous month filling the first week
    LeadingDay,
    /// Actual day within the month
    MonthDay,
    /// Day from the next month filling the last week
    TrailingDay,
}

/// Represents a single day cell in the calendar grid.
///
/// Leading and trailing cells carry real dates from the adjacent months,
/// not blanks, so every cell can be toggled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day key in YYYY-MM-DD format
    pub date: String,
    /// Day-of-month number of this cell's real date
    pub day: u32,
    pub day_type: CalendarDayType,
    /// Logs recorded on this day
    pub logs: Vec<HabitLog>,
}

/// Represents a calendar month with its associated habit log data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    /// Always a whole number of weeks (length is a multiple of 7)
    pub days: Vec<CalendarDay>,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
}

/// Request for calendar month data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonthRequest {
    pub month: u32,
    pub year: u32,
}

/// Month/year pair the calendar is currently focused on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
        }
    }
}

impl CalendarFocusDate {
    /// Focus date of the month before this one
    pub fn previous_month(&self) -> CalendarFocusDate {
        if self.month == 1 {
            CalendarFocusDate { month: 12, year: self.year - 1 }
        } else {
            CalendarFocusDate { month: self.month - 1, year: self.year }
        }
    }

    /// Focus date of the month after this one
    pub fn next_month(&self) -> CalendarFocusDate {
        if self.month == 12 {
            CalendarFocusDate { month: 1, year: self.year + 1 }
        } else {
            CalendarFocusDate { month: self.month + 1, year: self.year }
        }
    }
}

/// Error kind carried on every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ApiErrorKind {
    /// No valid session, or the session does not own the resource
    Unauthorized,
    /// The named resource does not exist
    NotFound,
    /// The request was well-formed but semantically invalid
    Validation,
    /// Stored data violates an invariant (e.g. duplicate logs for one day)
    ConsistencyFault,
    /// Unexpected server-side failure
    Internal,
}

/// Structured error body returned by all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl UserProfile {
    /// Generate a user ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("user::{}", epoch_millis)
    }

    /// Parse a user ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, UserIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "user" {
            return Err(UserIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| UserIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserIdError::InvalidFormat => write!(f, "Invalid user ID format"),
            UserIdError::InvalidTimestamp => write!(f, "Invalid timestamp in user ID"),
        }
    }
}

impl std::error::Error for UserIdError {}

impl Habit {
    /// Generate a habit ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("habit::{}", epoch_millis)
    }

    /// Parse a habit ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, HabitIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "habit" {
            return Err(HabitIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| HabitIdError::InvalidTimestamp)
    }

    /// Extract timestamp from habit ID
    pub fn extract_timestamp(&self) -> Result<u64, HabitIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HabitIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for HabitIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitIdError::InvalidFormat => write!(f, "Invalid habit ID format"),
            HabitIdError::InvalidTimestamp => write!(f, "Invalid timestamp in habit ID"),
        }
    }
}

impl std::error::Error for HabitIdError {}

impl HabitLog {
    /// Generate a log ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("habitlog::{}", epoch_millis)
    }

    /// Generate a provisional log ID for an optimistic update that has not
    /// been confirmed by the server yet
    pub fn generate_provisional_id(epoch_millis: u64) -> String {
        format!("habitlog::provisional::{}", epoch_millis)
    }

    /// Whether a log ID marks an unconfirmed optimistic entry
    pub fn is_provisional(id: &str) -> bool {
        let parts: Vec<&str> = id.split("::").collect();
        parts.len() == 3 && parts[0] == "habitlog" && parts[1] == "provisional"
    }

    /// Parse a log ID (confirmed or provisional) to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, LogIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        let millis = match parts.as_slice() {
            ["habitlog", millis] => *millis,
            ["habitlog", "provisional", millis] => *millis,
            _ => return Err(LogIdError::InvalidFormat),
        };

        millis.parse::<u64>().map_err(|_| LogIdError::InvalidTimestamp)
    }

    /// Extract timestamp from this log's ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, LogIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for LogIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogIdError::InvalidFormat => write!(f, "Invalid habit log ID format"),
            LogIdError::InvalidTimestamp => write!(f, "Invalid timestamp in habit log ID"),
        }
    }
}

impl std::error::Error for LogIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log(id: &str) -> HabitLog {
        HabitLog {
            id: id.to_string(),
            habit_id: "habit::1702516100000".to_string(),
            user_id: "user::1702516000000".to_string(),
            date: "2024-03-10".to_string(),
            notes: None,
            created_at: "2024-03-10T09:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_generate_user_id() {
        let user_id = UserProfile::generate_id(1702516122000);
        assert_eq!(user_id, "user::1702516122000");
    }

    #[test]
    fn test_parse_user_id() {
        // Test valid user ID
        let timestamp = UserProfile::parse_id("user::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Test invalid format
        assert!(UserProfile::parse_id("invalid::format").is_err());
        assert!(UserProfile::parse_id("user").is_err());
        assert!(UserProfile::parse_id("not_user::123").is_err());

        // Test invalid timestamp
        assert!(UserProfile::parse_id("user::not_a_number").is_err());
    }

    #[test]
    fn test_generate_habit_id() {
        let habit_id = Habit::generate_id(1702516122000);
        assert_eq!(habit_id, "habit::1702516122000");
    }

    #[test]
    fn test_parse_habit_id() {
        // Test valid habit ID
        let timestamp = Habit::parse_id("habit::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Test invalid format
        assert!(Habit::parse_id("habit").is_err());
        assert!(Habit::parse_id("habit::1::2").is_err());
        assert!(Habit::parse_id("not_habit::123").is_err());

        // Test invalid timestamp
        assert!(Habit::parse_id("habit::not_a_number").is_err());
    }

    #[test]
    fn test_habit_extract_timestamp() {
        let habit = Habit {
            id: "habit::1702516122000".to_string(),
            user_id: "user::1702516000000".to_string(),
            name: "Read".to_string(),
            color: "#f69fa9".to_string(),
            description: None,
            created_at: "2023-12-14T01:02:02.000Z".to_string(),
        };

        assert_eq!(habit.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_generate_log_ids() {
        assert_eq!(HabitLog::generate_id(1702516122000), "habitlog::1702516122000");
        assert_eq!(
            HabitLog::generate_provisional_id(1702516125000),
            "habitlog::provisional::1702516125000"
        );
    }

    #[test]
    fn test_parse_log_id() {
        // Confirmed ID
        assert_eq!(HabitLog::parse_id("habitlog::1702516122000").unwrap(), 1702516122000);

        // Provisional ID
        assert_eq!(
            HabitLog::parse_id("habitlog::provisional::1702516125000").unwrap(),
            1702516125000
        );

        // Invalid formats
        assert!(HabitLog::parse_id("habitlog").is_err());
        assert!(HabitLog::parse_id("habitlog::pending::123").is_err());
        assert!(HabitLog::parse_id("not_habitlog::123").is_err());

        // Invalid timestamp
        assert!(HabitLog::parse_id("habitlog::not_a_number").is_err());
        assert!(HabitLog::parse_id("habitlog::provisional::soon").is_err());
    }

    #[test]
    fn test_is_provisional() {
        assert!(HabitLog::is_provisional("habitlog::provisional::1702516125000"));
        assert!(!HabitLog::is_provisional("habitlog::1702516122000"));
        assert!(!HabitLog::is_provisional("habit::1702516122000"));
    }

    #[test]
    fn test_log_extract_timestamp() {
        let log = sample_log("habitlog::1702516122000");
        assert_eq!(log.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_toggle_outcome_wire_shape() {
        // Client and server must agree on the enum encoding
        let logged = ToggleOutcome::Logged(sample_log("habitlog::1702516122000"));
        let json = serde_json::to_value(&logged).unwrap();
        assert!(json.get("Logged").is_some());

        let cleared = ToggleOutcome::Cleared {
            log_id: "habitlog::1702516122000".to_string(),
        };
        let json = serde_json::to_value(&cleared).unwrap();
        assert_eq!(json["Cleared"]["log_id"], "habitlog::1702516122000");

        let decoded: ToggleOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, cleared);
    }

    #[test]
    fn test_focus_date_navigation() {
        let focus = CalendarFocusDate { month: 6, year: 2025 };

        // Test previous month
        assert_eq!(focus.previous_month(), CalendarFocusDate { month: 5, year: 2025 });
        let january = CalendarFocusDate { month: 1, year: 2025 };
        assert_eq!(january.previous_month(), CalendarFocusDate { month: 12, year: 2024 });

        // Test next month
        assert_eq!(focus.next_month(), CalendarFocusDate { month: 7, year: 2025 });
        let december = CalendarFocusDate { month: 12, year: 2025 };
        assert_eq!(december.next_month(), CalendarFocusDate { month: 1, year: 2026 });
    }
}
