//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use uuid::Uuid;

use super::error::ApiError;
use super::server::AppState;
use crate::auth;

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
pub struct AuthUser(pub Uuid);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

        let user_id = auth::verify_token(token, &state.token_secret, Utc::now()).map_err(|err| {
            tracing::debug!(%err, "rejected bearer token");
            ApiError::Unauthorized
        })?;

        Ok(Self(user_id))
    }
}
