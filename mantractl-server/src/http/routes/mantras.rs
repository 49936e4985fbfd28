//! Mantra endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mantractl_core::Mantra;

use crate::db::repos::MantraRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AuthUser;
use crate::http::server::AppState;
use crate::models::{Goal, MantraText, MantraTitle};

/// Create mantra request
#[derive(Deserialize)]
pub struct CreateMantraRequest {
    pub title: String,
    pub text: String,
    pub goal: i64,
}

/// Update mantra request; absent fields are left unchanged
#[derive(Deserialize)]
pub struct UpdateMantraRequest {
    pub title: Option<String>,
    pub text: Option<String>,
    pub goal: Option<i64>,
}

/// Mantra response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MantraResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub text: String,
    pub goal: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Mantra> for MantraResponse {
    fn from(m: Mantra) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            text: m.text,
            goal: m.goal,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/mantras - list the caller's mantras
async fn list_mantras(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MantraResponse>>, ApiError> {
    let mantras = MantraRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(mantras.into_iter().map(MantraResponse::from).collect()))
}

/// POST /api/mantras - create a new mantra
async fn create_mantra(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateMantraRequest>,
) -> Result<(StatusCode, Json<MantraResponse>), ApiError> {
    let title = MantraTitle::new(&req.title)?;
    let text = MantraText::new(&req.text)?;
    let goal = Goal::new(req.goal)?;

    let mantra = MantraRepo::new(&state.pool)
        .create(user_id, title, text, goal)
        .await?;

    Ok((StatusCode::CREATED, Json(MantraResponse::from(mantra))))
}

/// PUT /api/mantras/{id} - partially update a mantra
async fn update_mantra(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMantraRequest>,
) -> Result<Json<MantraResponse>, ApiError> {
    let title = req.title.as_deref().map(MantraTitle::new).transpose()?;
    let text = req.text.as_deref().map(MantraText::new).transpose()?;
    let goal = req.goal.map(Goal::new).transpose()?;

    let mantra = MantraRepo::new(&state.pool)
        .update(id, user_id, title, text, goal)
        .await?;

    Ok(Json(MantraResponse::from(mantra)))
}

/// DELETE /api/mantras/{id} - delete a mantra and its sessions
async fn delete_mantra(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    MantraRepo::new(&state.pool).delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mantra routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/mantras", get(list_mantras).post(create_mantra))
        .route("/api/mantras/{id}", put(update_mantra).delete(delete_mantra))
}
