use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::extractors::AuthGuard;
use crate::models::GenerateMarathonBody;
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::MARATHON_URL, post(generate_marathon))
        .route("/marathon/{id}/today", get(due_quiz))
}

async fn generate_marathon(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<GenerateMarathonBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.total_days < 1 {
        return Err(AppError::Input("total_days must be at least 1"));
    }

    let start_date = Utc::now().date_naive();
    let marathon_id = match state
        .db
        .create_marathon(&user.username, &body.category, body.total_days, start_date)
        .await
    {
        Ok(id) => id,
        Err(e) if e.to_string().contains("enough flashcards") => {
            tracing::warn!("marathon refused for '{}': {e}", user.username);
            return Err(AppError::Insufficient(e.to_string()));
        }
        Err(e) => {
            tracing::error!("could not create marathon for '{}': {e}", user.username);
            return Err(AppError::Internal("Failed to generate marathon"));
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({ "marathon_id": marathon_id })),
    ))
}

async fn due_quiz(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let due = state
        .db
        .due_quiz(&id, today)
        .await
        .reject("failed to look up marathon")?
        .ok_or(AppError::NotFound("Marathon not found"))?;

    Ok(Json(due))
}
