//! Repository implementations for per-user storage access
//!
//! Each repository follows these patterns:
//! - Every statement is scoped by owning-user id, never by record id alone
//! - Writes are single statements relying on constraints and RETURNING
//! - History reads tolerate individual corrupt rows

pub mod mantras;
pub mod sessions;
pub mod users;

pub use mantras::MantraRepo;
pub use sessions::SessionRepo;
pub use users::{UserRecord, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
