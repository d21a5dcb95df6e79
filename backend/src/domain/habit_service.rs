use chrono::Utc;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::Habit;
use crate::storage::HabitRepository;
use shared::CreateHabitRequest;

/// Service for managing habit definitions
#[derive(Clone)]
pub struct HabitService {
    habits: HabitRepository,
}

impl HabitService {
    pub fn new(habits: HabitRepository) -> Self {
        Self { habits }
    }

    /// Create a new habit for a user
    pub async fn create_habit(
        &self,
        user_id: &str,
        request: CreateHabitRequest,
    ) -> Result<Habit, DomainError> {
        info!("Creating habit: {} for user: {}", request.name, user_id);

        self.validate_create(&request)?;

        let now = Utc::now();
        let habit = Habit {
            id: shared::Habit::generate_id(now.timestamp_millis() as u64),
            user_id: user_id.to_string(),
            name: request.name.trim().to_string(),
            color: request.color.trim().to_string(),
            description: request
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            created_at: now,
        };

        self.habits.store_habit(&habit).await?;

        info!("Created habit {} with ID: {}", habit.name, habit.id);

        Ok(habit)
    }

    /// Get a habit owned by a user
    pub async fn get_habit(&self, habit_id: &str, user_id: &str) -> Result<Habit, DomainError> {
        self.habits
            .get_habit(habit_id, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Habit not found: {}", habit_id)))
    }

    /// List a user's habits, newest first
    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>, DomainError> {
        let habits = self.habits.list_habits(user_id).await?;
        Ok(habits)
    }

    /// Delete a habit together with every log recorded against it.
    ///
    /// Returns the deleted habit and the number of logs that went with it.
    pub async fn delete_habit(
        &self,
        habit_id: &str,
        user_id: &str,
    ) -> Result<(Habit, u64), DomainError> {
        info!("Deleting habit: {} for user: {}", habit_id, user_id);

        let habit = self.get_habit(habit_id, user_id).await?;
        let removed_logs = self.habits.delete_habit_with_logs(&habit.id).await?;

        info!(
            "Deleted habit {} and {} associated logs",
            habit.id, removed_logs
        );

        Ok((habit, removed_logs))
    }

    /// Validate habit creation request
    fn validate_create(&self, request: &CreateHabitRequest) -> Result<(), DomainError> {
        if request.name.trim().is_empty() {
            warn!("Habit creation rejected, empty name");
            return Err(DomainError::validation("Habit name cannot be empty"));
        }

        if request.name.len() > 100 {
            return Err(DomainError::validation(
                "Habit name cannot exceed 100 characters",
            ));
        }

        if request.color.trim().is_empty() {
            return Err(DomainError::validation("Habit color cannot be empty"));
        }

        Ok(())
    }
}
