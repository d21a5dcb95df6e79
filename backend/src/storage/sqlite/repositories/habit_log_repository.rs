use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Habit, HabitLog};
use crate::storage::sqlite::connection::DbConnection;

/// Repository for habit log rows
#[derive(Clone)]
pub struct HabitLogRepository {
    db: DbConnection,
}

impl HabitLogRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a log in the database
    pub async fn store_log(&self, log: &HabitLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO habit_logs (id, habit_id, user_id, date, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.id)
        .bind(&log.habit_id)
        .bind(&log.user_id)
        .bind(log.date.to_rfc3339())
        .bind(&log.notes)
        .bind(log.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Find the logs matching a (habit, user, canonical day) triple.
    ///
    /// The `date` must be the UTC-midnight anchor of the day; matching is
    /// exact on that canonical form. A healthy store yields zero or one row,
    /// but all matches are returned so callers can detect duplicates.
    pub async fn find_by_habit_and_day(
        &self,
        habit_id: &str,
        user_id: &str,
        date: DateTime<Utc>,
    ) -> Result<Vec<HabitLog>> {
        let rows = sqlx::query(
            r#"
            SELECT id, habit_id, user_id, date, notes, created_at
            FROM habit_logs
            WHERE habit_id = ? AND user_id = ? AND date = ?
            "#,
        )
        .bind(habit_id)
        .bind(user_id)
        .bind(date.to_rfc3339())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_log).collect()
    }

    /// Delete a log, returning whether a row was removed
    pub async fn delete_log(&self, log_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM habit_logs WHERE id = ?
            "#,
        )
        .bind(log_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all of a user's logs joined with their habits, newest day first
    pub async fn list_logs_with_habits(&self, user_id: &str) -> Result<Vec<(HabitLog, Habit)>> {
        let rows = sqlx::query(
            r#"
            SELECT
                hl.id, hl.habit_id, hl.user_id, hl.date, hl.notes, hl.created_at,
                h.name, h.color, h.description, h.created_at AS habit_created_at
            FROM habit_logs hl
            JOIN habits h ON h.id = hl.habit_id
            WHERE hl.user_id = ?
            ORDER BY hl.date DESC, hl.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let log = row_to_log(row)?;
                let habit_created_at: String = row.get("habit_created_at");
                let habit = Habit {
                    id: row.get("habit_id"),
                    user_id: row.get("user_id"),
                    name: row.get("name"),
                    color: row.get("color"),
                    description: row.get("description"),
                    created_at: DateTime::parse_from_rfc3339(&habit_created_at)
                        .context("Failed to parse habit created_at")?
                        .with_timezone(&Utc),
                };
                Ok((log, habit))
            })
            .collect()
    }

    /// List a user's logs whose day falls within an inclusive date range
    pub async fn list_logs_in_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HabitLog>> {
        let rows = sqlx::query(
            r#"
            SELECT id, habit_id, user_id, date, notes, created_at
            FROM habit_logs
            WHERE user_id = ? AND date >= ? AND date <= ?
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_log).collect()
    }
}

fn row_to_log(row: &SqliteRow) -> Result<HabitLog> {
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");

    Ok(HabitLog {
        id: row.get("id"),
        habit_id: row.get("habit_id"),
        user_id: row.get("user_id"),
        date: DateTime::parse_from_rfc3339(&date)
            .context("Failed to parse log date")?
            .with_timezone(&Utc),
        notes: row.get("notes"),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .context("Failed to parse log created_at")?
            .with_timezone(&Utc),
    })
}
