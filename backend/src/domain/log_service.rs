use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::{Habit, HabitLog, ToggleOutcome};
use crate::storage::{HabitLogRepository, HabitRepository};
use shared::date_key;
use shared::ToggleLogRequest;

/// Service for habit log entries and the day-toggle flow
#[derive(Clone)]
pub struct LogService {
    logs: HabitLogRepository,
    habits: HabitRepository,
}

impl LogService {
    pub fn new(logs: HabitLogRepository, habits: HabitRepository) -> Self {
        Self { logs, habits }
    }

    /// Flip a habit's completion for one day.
    ///
    /// The lookup is keyed on the (habit, user, day) triple rather than on a
    /// log ID sent by the client, so the flip lands on the server's current
    /// state even when the caller's view is stale. No matching log means a
    /// new one is created; exactly one means it is removed. More than one
    /// should be impossible through this flow and is reported as a
    /// consistency fault instead of silently picking a row.
    pub async fn toggle_log(
        &self,
        user_id: &str,
        request: ToggleLogRequest,
    ) -> Result<ToggleOutcome, DomainError> {
        info!(
            "Toggling log for habit: {} on {} for user: {}",
            request.habit_id, request.date, user_id
        );

        let date = date_key::parse_day_key(&request.date).ok_or_else(|| {
            DomainError::validation("Date must be formatted as YYYY-MM-DD")
        })?;

        let habit = self
            .habits
            .get_habit(&request.habit_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Habit not found: {}", request.habit_id))
            })?;

        let day = date_key::utc_midnight(date);
        let existing = self
            .logs
            .find_by_habit_and_day(&habit.id, user_id, day)
            .await?;

        match existing.as_slice() {
            [] => {
                let log = self.record_log(&habit, user_id, day, request.notes).await?;
                info!("Logged habit {} on {}: {}", habit.id, request.date, log.id);
                Ok(ToggleOutcome::Logged(log))
            }
            [log] => {
                self.logs.delete_log(&log.id).await?;
                info!("Cleared habit {} on {}: {}", habit.id, request.date, log.id);
                Ok(ToggleOutcome::Cleared {
                    log_id: log.id.clone(),
                })
            }
            logs => {
                warn!(
                    "Found {} logs for habit {} on {}, refusing to toggle",
                    logs.len(),
                    habit.id,
                    request.date
                );
                Err(DomainError::consistency(format!(
                    "Found {} logs for habit {} on {}, expected at most one",
                    logs.len(),
                    habit.id,
                    request.date
                )))
            }
        }
    }

    /// List every log for a user together with its habit, newest day first
    pub async fn list_logs(&self, user_id: &str) -> Result<Vec<(HabitLog, Habit)>, DomainError> {
        let entries = self.logs.list_logs_with_habits(user_id).await?;
        Ok(entries)
    }

    /// Logs for a user between two canonical day instants, inclusive
    pub async fn logs_in_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HabitLog>, DomainError> {
        let logs = self.logs.list_logs_in_range(user_id, start, end).await?;
        Ok(logs)
    }

    /// Insert a fresh log row for a habit on a day
    async fn record_log(
        &self,
        habit: &Habit,
        user_id: &str,
        day: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<HabitLog, DomainError> {
        let now = Utc::now();
        let log = HabitLog {
            id: shared::HabitLog::generate_id(now.timestamp_millis() as u64),
            habit_id: habit.id.clone(),
            user_id: user_id.to_string(),
            date: day,
            notes: notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            created_at: now,
        };

        self.logs.store_log(&log).await?;

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::User;
    use crate::storage::{DbConnection, UserRepository};

    async fn setup_test() -> (LogService, DbConnection, String) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let users = UserRepository::new(db.clone());
        let user = User {
            id: "user::1702516000000".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };
        users.store_user(&user).await.expect("Failed to store user");

        let service = LogService::new(
            HabitLogRepository::new(db.clone()),
            HabitRepository::new(db.clone()),
        );

        (service, db, user.id)
    }

    async fn store_habit(db: &DbConnection, user_id: &str) -> Habit {
        let habit = Habit {
            id: "habit::1702517000000".to_string(),
            user_id: user_id.to_string(),
            name: "H1".to_string(),
            color: "#f69fa9".to_string(),
            description: None,
            created_at: Utc::now(),
        };
        HabitRepository::new(db.clone())
            .store_habit(&habit)
            .await
            .expect("Failed to store habit");
        habit
    }

    #[tokio::test]
    async fn test_toggle_creates_then_clears() {
        let (service, db, user_id) = setup_test().await;
        let habit = store_habit(&db, &user_id).await;

        let request = ToggleLogRequest {
            habit_id: habit.id.clone(),
            date: "2024-03-10".to_string(),
            notes: None,
        };

        // First toggle creates a log
        let outcome = service
            .toggle_log(&user_id, request.clone())
            .await
            .expect("Failed to toggle");
        let log = match outcome {
            ToggleOutcome::Logged(log) => log,
            other => panic!("Expected Logged, got {:?}", other),
        };
        assert_eq!(log.habit_id, habit.id);
        assert_eq!(log.user_id, user_id);
        assert_eq!(date_key::date_to_key(log.date.date_naive()), "2024-03-10");

        // Second toggle with the same key clears that exact log
        let outcome = service
            .toggle_log(&user_id, request.clone())
            .await
            .expect("Failed to toggle");
        match outcome {
            ToggleOutcome::Cleared { log_id } => assert_eq!(log_id, log.id),
            other => panic!("Expected Cleared, got {:?}", other),
        }

        // Third toggle starts over with a fresh log
        let outcome = service
            .toggle_log(&user_id, request)
            .await
            .expect("Failed to toggle");
        match outcome {
            ToggleOutcome::Logged(new_log) => assert_ne!(new_log.id, log.id),
            other => panic!("Expected Logged, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_toggle_rejects_bad_date() {
        let (service, db, user_id) = setup_test().await;
        let habit = store_habit(&db, &user_id).await;

        for date in ["2024-3-10", "03/10/2024", "not-a-date"] {
            let result = service
                .toggle_log(
                    &user_id,
                    ToggleLogRequest {
                        habit_id: habit.id.clone(),
                        date: date.to_string(),
                        notes: None,
                    },
                )
                .await;
            assert!(
                matches!(result, Err(DomainError::Validation(_))),
                "date {:?} should be rejected",
                date
            );
        }
    }

    #[tokio::test]
    async fn test_toggle_unknown_habit() {
        let (service, _, user_id) = setup_test().await;

        let result = service
            .toggle_log(
                &user_id,
                ToggleLogRequest {
                    habit_id: "habit::999".to_string(),
                    date: "2024-03-10".to_string(),
                    notes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_reports_duplicate_rows() {
        let (service, db, user_id) = setup_test().await;
        let habit = store_habit(&db, &user_id).await;

        // Plant two rows for the same day behind the service's back
        let day = date_key::utc_midnight(date_key::parse_day_key("2024-03-10").unwrap());
        let repo = HabitLogRepository::new(db.clone());
        for millis in [1_u64, 2] {
            let log = HabitLog {
                id: shared::HabitLog::generate_id(millis),
                habit_id: habit.id.clone(),
                user_id: user_id.clone(),
                date: day,
                notes: None,
                created_at: Utc::now(),
            };
            repo.store_log(&log).await.expect("Failed to store log");
        }

        let result = service
            .toggle_log(
                &user_id,
                ToggleLogRequest {
                    habit_id: habit.id.clone(),
                    date: "2024-03-10".to_string(),
                    notes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::ConsistencyFault(_))));
    }

    #[tokio::test]
    async fn test_list_logs_carries_habits() {
        let (service, db, user_id) = setup_test().await;
        let habit = store_habit(&db, &user_id).await;

        service
            .toggle_log(
                &user_id,
                ToggleLogRequest {
                    habit_id: habit.id.clone(),
                    date: "2024-03-10".to_string(),
                    notes: Some("felt great".to_string()),
                },
            )
            .await
            .expect("Failed to toggle");

        let entries = service.list_logs(&user_id).await.expect("Failed to list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.notes.as_deref(), Some("felt great"));
        assert_eq!(entries[0].1.name, "H1");
        assert_eq!(entries[0].1.color, "#f69fa9");
    }
}
