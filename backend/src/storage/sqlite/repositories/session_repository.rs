use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::models::Session;
use crate::storage::sqlite::connection::DbConnection;

/// Repository for bearer-token session rows
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a session in the database
    pub async fn store_session(&self, session: &Session) -> Result<()> {
        let created_at = session
            .created_at
            .format(&Rfc3339)
            .context("Failed to format session created_at")?;
        let expires_at = session
            .expires_at
            .format(&Rfc3339)
            .context("Failed to format session expires_at")?;

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(created_at)
        .bind(expires_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a session by token
    pub async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_session).transpose()
    }

    /// Delete a session, returning whether a row was removed
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions WHERE token = ?
            "#,
        )
        .bind(token)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session that expired on or before the given instant
    pub async fn delete_expired(&self, now: OffsetDateTime) -> Result<u64> {
        let cutoff = now.format(&Rfc3339).context("Failed to format cutoff")?;

        let result = sqlx::query(
            r#"
            DELETE FROM sessions WHERE expires_at <= ?
            "#,
        )
        .bind(cutoff)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_session(row: &SqliteRow) -> Result<Session> {
    let created_at: String = row.get("created_at");
    let expires_at: String = row.get("expires_at");

    Ok(Session {
        token: row.get("token"),
        user_id: row.get("user_id"),
        created_at: OffsetDateTime::parse(&created_at, &Rfc3339)
            .context("Failed to parse session created_at")?,
        expires_at: OffsetDateTime::parse(&expires_at, &Rfc3339)
            .context("Failed to parse session expires_at")?,
    })
}
