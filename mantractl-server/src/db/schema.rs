//! Idempotent schema bootstrap
//!
//! Runs `CREATE TABLE IF NOT EXISTS` for every table the server touches;
//! safe to run on every startup. There is no versioned migration framework
//! here - the schema is provisioned, not evolved.

use sqlx::PgPool;

use super::repos::DbError;

/// Ensure all tables and indexes exist.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring database schema...");

    // Users are provisioned out-of-band (operator CLI); the table exists so
    // ownership cascades have an anchor.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mantras (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            goal BIGINT NOT NULL CHECK (goal >= 1),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Sessions are immutable once created: no UPDATE statement exists for
    // this table anywhere in the codebase.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS practice_sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            mantra_id UUID NOT NULL REFERENCES mantras(id) ON DELETE CASCADE,
            count INTEGER NOT NULL CHECK (count >= 1),
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_mantras_user ON mantras(user_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON practice_sessions(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_mantra ON practice_sessions(mantra_id)")
        .execute(pool)
        .await?;
    // Stats reads scan a user's full session history ordered by time.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sessions_user_recorded ON practice_sessions(user_id, recorded_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
