use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::extractors::AuthGuard;
use crate::models::StatsResponse;
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::STATS_URL, get(stats))
}

async fn stats(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let preferred_time = state
        .db
        .preferred_study_time(&user.username)
        .await
        .reject("failed to compute preferred study time")?;

    let easy_per_category = state
        .db
        .easy_count_per_category(&user.username)
        .await
        .reject("failed to compute category distribution")?;

    let difficulty_distribution = state
        .db
        .difficulty_distribution(&user.username)
        .await
        .reject("failed to compute difficulty distribution")?;

    let per_category_breakdown = state
        .db
        .difficulty_breakdown_per_category(&user.username)
        .await
        .reject("failed to compute per-category breakdown")?;

    let average_duration = state
        .db
        .average_quiz_duration(&user.username)
        .await
        .reject("failed to compute average quiz duration")?;

    Ok(Json(StatsResponse(
        preferred_time,
        easy_per_category,
        difficulty_distribution,
        per_category_breakdown,
        average_duration,
    )))
}
