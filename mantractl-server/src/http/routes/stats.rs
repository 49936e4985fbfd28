//! Statistics endpoint
//!
//! The handler owns all the I/O: both per-user fetches run concurrently,
//! then the pure aggregator in mantractl-core does the actual computation
//! against the current UTC calendar day.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use mantractl_core::stats::{summarize, DayActivity, StatsSummary};

use crate::db::repos::{MantraRepo, SessionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AuthUser;
use crate::http::server::AppState;

/// Statistics response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_repetitions: i64,
    pub total_mantras: usize,
    pub active_days: usize,
    pub current_streak: u32,
    pub daily_activity: Vec<DayActivityResponse>,
}

/// One day in the activity series; `date` serializes as `YYYY-MM-DD`
#[derive(Serialize)]
pub struct DayActivityResponse {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<StatsSummary> for StatsResponse {
    fn from(s: StatsSummary) -> Self {
        Self {
            total_repetitions: s.total_repetitions,
            total_mantras: s.total_mantras,
            active_days: s.active_days,
            current_streak: s.current_streak,
            daily_activity: s
                .daily_activity
                .into_iter()
                .map(|DayActivity { date, count }| DayActivityResponse { date, count })
                .collect(),
        }
    }
}

/// GET /api/stats - aggregate statistics for the caller
async fn get_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let mantra_repo = MantraRepo::new(&state.pool);
    let session_repo = SessionRepo::new(&state.pool);

    // Two independent reads; neither orders before the other.
    let (mantras, sessions) = tokio::try_join!(
        mantra_repo.list_for_user(user_id),
        session_repo.list_for_user(user_id),
    )?;

    let today = Utc::now().date_naive();
    let summary = summarize(user_id, &mantras, &sessions, today);

    Ok(Json(StatsResponse::from(summary)))
}

/// Stats routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}
