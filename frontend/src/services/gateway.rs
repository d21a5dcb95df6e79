use async_trait::async_trait;

use super::api::ApiClient;
use super::error::ClientError;
use shared::{
    CalendarMonth, CreateHabitRequest, DeleteHabitResponse, Habit, LogEntry, ToggleLogRequest,
    ToggleOutcome,
};

/// Server operations the dashboard state depends on.
///
/// The dashboard only ever talks to the server through this trait, so its
/// optimistic-update logic can be tested against a scripted fake instead of
/// a running backend.
#[async_trait]
pub trait HabitGateway {
    async fn list_habits(&self) -> Result<Vec<Habit>, ClientError>;
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, ClientError>;
    async fn delete_habit(&self, habit_id: &str) -> Result<DeleteHabitResponse, ClientError>;
    async fn list_logs(&self) -> Result<Vec<LogEntry>, ClientError>;
    async fn toggle_log(&self, request: ToggleLogRequest) -> Result<ToggleOutcome, ClientError>;
    async fn calendar_month(&self, month: u32, year: u32) -> Result<CalendarMonth, ClientError>;
}

#[async_trait]
impl HabitGateway for ApiClient {
    async fn list_habits(&self) -> Result<Vec<Habit>, ClientError> {
        Ok(ApiClient::list_habits(self).await?.habits)
    }

    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, ClientError> {
        Ok(ApiClient::create_habit(self, request).await?.habit)
    }

    async fn delete_habit(&self, habit_id: &str) -> Result<DeleteHabitResponse, ClientError> {
        ApiClient::delete_habit(self, habit_id).await
    }

    async fn list_logs(&self) -> Result<Vec<LogEntry>, ClientError> {
        Ok(ApiClient::list_logs(self).await?.entries)
    }

    async fn toggle_log(&self, request: ToggleLogRequest) -> Result<ToggleOutcome, ClientError> {
        Ok(ApiClient::toggle_log(self, request).await?.outcome)
    }

    async fn calendar_month(&self, month: u32, year: u32) -> Result<CalendarMonth, ClientError> {
        self.get_calendar_month(month, year).await
    }
}
