//! Mantra repository
//!
//! CRUD over a user's mantras. Update and delete statements carry the
//! owning-user id in the WHERE clause, so a caller can never reach another
//! user's records by id alone.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use mantractl_core::Mantra;

use crate::models::{Goal, MantraText, MantraTitle};

use super::DbError;

/// Mantra repository
pub struct MantraRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MantraRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a mantra owned by `user_id`.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: MantraTitle,
        text: MantraText,
        goal: Goal,
    ) -> Result<Mantra, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO mantras (user_id, title, text, goal)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, text, goal, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title.as_str())
        .bind(text.as_str())
        .bind(goal.get())
        .fetch_one(self.pool)
        .await?;

        Ok(mantra_from_row(&row))
    }

    /// List all mantras owned by `user_id`, oldest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Mantra>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, text, goal, created_at, updated_at
            FROM mantras
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(mantra_from_row).collect())
    }

    /// Apply a partial update; absent fields keep their stored value.
    ///
    /// Single COALESCE statement; `updated_at` is bumped even when every
    /// field is absent.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<MantraTitle>,
        text: Option<MantraText>,
        goal: Option<Goal>,
    ) -> Result<Mantra, DbError> {
        let row = sqlx::query(
            r#"
            UPDATE mantras
            SET title = COALESCE($3, title),
                text = COALESCE($4, text),
                goal = COALESCE($5, goal),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, text, goal, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title.as_ref().map(MantraTitle::as_str))
        .bind(text.as_ref().map(MantraText::as_str))
        .bind(goal.map(Goal::get))
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "mantra",
            id: id.to_string(),
        })?;

        Ok(mantra_from_row(&row))
    }

    /// Delete a mantra and (via cascade) its practice sessions.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM mantras WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "mantra",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn mantra_from_row(row: &PgRow) -> Mantra {
    Mantra {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        text: row.get("text"),
        goal: row.get("goal"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, schema};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p mantractl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_scoped_by_owner() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::ensure(&pool).await.expect("schema bootstrap failed");

        let owner = crate::db::UserRepo::new(&pool)
            .create("owner@example.com", "Owner")
            .await
            .expect("user insert failed");

        let repo = MantraRepo::new(&pool);
        let mantra = repo
            .create(
                owner.id,
                MantraTitle::new("test").unwrap(),
                MantraText::new("text").unwrap(),
                Goal::new(10).unwrap(),
            )
            .await
            .expect("create failed");

        // Updating with a different user id must report not-found.
        let err = repo
            .update(mantra.id, Uuid::new_v4(), None, None, Some(Goal::new(5).unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        repo.delete(mantra.id, owner.id).await.expect("delete failed");
    }
}
