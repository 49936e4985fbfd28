//! Practice session endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mantractl_core::PracticeSession;

use crate::db::repos::SessionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AuthUser;
use crate::http::server::AppState;
use crate::models::RepCount;

/// Create session request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub mantra_id: Uuid,
    pub count: i64,
    /// Date of practice; defaults to now when unspecified
    pub date: Option<DateTime<Utc>>,
}

/// Session response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mantra_id: Uuid,
    pub count: i64,
    pub date: String,
}

impl From<PracticeSession> for SessionResponse {
    fn from(s: PracticeSession) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            mantra_id: s.mantra_id,
            count: s.count,
            date: s.recorded_at.to_rfc3339(),
        }
    }
}

/// GET /api/sessions - list the caller's practice sessions
async fn list_sessions(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = SessionRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}

/// POST /api/sessions - record repetitions against a mantra
async fn create_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let count = RepCount::new(req.count)?;
    let recorded_at = req.date.unwrap_or_else(Utc::now);

    let session = SessionRepo::new(&state.pool)
        .create(user_id, req.mantra_id, count, recorded_at)
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// Session routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/sessions", get(list_sessions).post(create_session))
}
