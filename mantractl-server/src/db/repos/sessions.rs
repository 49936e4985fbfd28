//! Practice session repository
//!
//! Sessions are insert-only. Creation verifies mantra ownership in the same
//! statement as the insert (INSERT ... SELECT against the mantras table), so
//! there is no window where the mantra can disappear between a check and
//! the write.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use mantractl_core::PracticeSession;

use crate::models::RepCount;

use super::DbError;

/// Practice session repository
pub struct SessionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a practice session against a mantra owned by `user_id`.
    ///
    /// Returns not-found when the mantra does not exist or belongs to a
    /// different user; the two cases are deliberately indistinguishable.
    pub async fn create(
        &self,
        user_id: Uuid,
        mantra_id: Uuid,
        count: RepCount,
        recorded_at: DateTime<Utc>,
    ) -> Result<PracticeSession, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO practice_sessions (user_id, mantra_id, count, recorded_at)
            SELECT m.user_id, m.id, $3, $4
            FROM mantras m
            WHERE m.id = $2 AND m.user_id = $1
            RETURNING id, user_id, mantra_id, count, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(mantra_id)
        .bind(count.get())
        .bind(recorded_at)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "mantra",
            id: mantra_id.to_string(),
        })?;

        decode_session(&row).map_err(DbError::from)
    }

    /// List the full session history for `user_id`, oldest first.
    ///
    /// Rows that fail to decode are skipped with a warning instead of
    /// failing the fetch: one corrupt record must not deny statistics for
    /// the whole user.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PracticeSession>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, mantra_id, count, recorded_at
            FROM practice_sessions
            WHERE user_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            match decode_session(row) {
                Ok(session) => sessions.push(session),
                Err(err) => {
                    tracing::warn!(user_id = %user_id, %err, "skipping undecodable session row");
                }
            }
        }
        Ok(sessions)
    }
}

fn decode_session(row: &PgRow) -> Result<PracticeSession, sqlx::Error> {
    Ok(PracticeSession {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        mantra_id: row.try_get("mantra_id")?,
        count: row.try_get::<i32, _>("count")? as i64,
        recorded_at: row.try_get("recorded_at")?,
    })
}
