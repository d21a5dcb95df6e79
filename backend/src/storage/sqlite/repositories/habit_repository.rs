use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Habit;
use crate::storage::sqlite::connection::DbConnection;

/// Repository for habit rows
#[derive(Clone)]
pub struct HabitRepository {
    db: DbConnection,
}

impl HabitRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a habit in the database
    pub async fn store_habit(&self, habit: &Habit) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO habits (id, user_id, name, color, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&habit.id)
        .bind(&habit.user_id)
        .bind(&habit.name)
        .bind(&habit.color)
        .bind(&habit.description)
        .bind(habit.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a habit by ID, scoped to its owner
    pub async fn get_habit(&self, habit_id: &str, user_id: &str) -> Result<Option<Habit>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, color, description, created_at
            FROM habits
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_habit).transpose()
    }

    /// List a user's habits, newest first
    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, color, description, created_at
            FROM habits
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_habit).collect()
    }

    /// Delete a habit together with all of its logs.
    ///
    /// Runs in a single transaction so a failure can never strand orphaned
    /// logs or a half-deleted habit. Returns the number of logs removed.
    pub async fn delete_habit_with_logs(&self, habit_id: &str) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let removed_logs = sqlx::query(
            r#"
            DELETE FROM habit_logs WHERE habit_id = ?
            "#,
        )
        .bind(habit_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            r#"
            DELETE FROM habits WHERE id = ?
            "#,
        )
        .bind(habit_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(removed_logs)
    }
}

fn row_to_habit(row: &SqliteRow) -> Result<Habit> {
    let created_at: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .context("Failed to parse habit created_at")?
        .with_timezone(&Utc);

    Ok(Habit {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        color: row.get("color"),
        description: row.get("description"),
        created_at,
    })
}
