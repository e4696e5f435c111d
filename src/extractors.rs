use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::{db::models::AuthUser, rejections::AppError, AppState};

/// Guard extractor that resolves the request's bearer token to a user
/// session in the database. Carries the authenticated user's info for use
/// in handlers.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if let Some(token) = token {
            if let Ok(Some(user)) = state.db.get_user_by_session(token).await {
                return Ok(AuthGuard(user));
            }
        }

        Err(AppError::Unauthorized)
    }
}
