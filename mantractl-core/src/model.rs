//! Domain records for the habit tracker.
//!
//! These are storage-shaped records, already scoped to one user by the
//! repository layer that fetched them. Derived statistics live in
//! [`crate::stats`] and are never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owning-user identifier.
pub type UserId = Uuid;

/// A user-defined repetition target.
///
/// Owned exclusively by one user; deleting the user cascades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mantra {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    /// Target repetition count, validated >= 1 at the input boundary.
    pub goal: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One logged practice event against a mantra.
///
/// Immutable once created; removed only via cascading mantra/user deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub mantra_id: Uuid,
    /// Repetitions performed, validated >= 1 at the input boundary.
    pub count: i64,
    pub recorded_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Calendar day this session was practiced on (timezone-naive truncation,
    /// no time-of-day component).
    pub fn day(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }
}
