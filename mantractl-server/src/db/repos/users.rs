//! User repository
//!
//! Users are provisioned by the operator CLI, never over HTTP. Creation is
//! idempotent on email so re-running `user add` converges instead of
//! erroring.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::DbError;

/// User record from database
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a user, updating the display name if the email already exists.
    pub async fn create(&self, email: &str, name: &str) -> Result<UserRecord, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, name) VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name, updated_at = NOW()
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(UserRecord {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            created_at: row.get("created_at"),
        })
    }

    /// Get a single user by id.
    pub async fn get(&self, id: Uuid) -> Result<UserRecord, DbError> {
        let row = sqlx::query("SELECT id, email, name, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            })?;

        Ok(UserRecord {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            created_at: row.get("created_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, schema};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_is_idempotent_on_email() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::ensure(&pool).await.expect("schema bootstrap failed");

        let repo = UserRepo::new(&pool);
        let first = repo.create("idem@example.com", "First").await.expect("insert failed");
        let second = repo.create("idem@example.com", "Second").await.expect("upsert failed");

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Second");
    }
}
