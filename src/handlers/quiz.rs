use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::extractors::AuthGuard;
use crate::models::{GenerateQuizzesBody, SubmitQuizBody};
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZZES_URL, post(generate_quizzes))
        .route(names::SUBMIT_QUIZ_URL, post(submit_quiz))
}

async fn generate_quizzes(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<GenerateQuizzesBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.categories.is_empty() {
        return Err(AppError::Input("at least one category is required"));
    }

    let quizzes = match state
        .db
        .generate_quizzes(&user.username, &body.categories, names::MIN_QUIZ_POOL)
        .await
    {
        Ok(quizzes) => quizzes,
        Err(e) if e.to_string().contains("enough flashcards") => {
            tracing::warn!("quiz generation refused for '{}': {e}", user.username);
            return Err(AppError::Insufficient(e.to_string()));
        }
        Err(e) => {
            tracing::error!("could not generate quizzes for '{}': {e}", user.username);
            return Err(AppError::Internal("Failed to generate quizzes"));
        }
    };

    Ok(Json(quizzes))
}

async fn submit_quiz(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<SubmitQuizBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.flashcards.is_empty() {
        return Err(AppError::Input("a submission needs at least one flashcard"));
    }

    state
        .db
        .submit_quiz(&user.username, &body)
        .await
        .reject_input("failed to submit quiz")?;

    Ok(Json(json!({
        "message": format!("Quiz {} submitted successfully", body.quiz_id)
    })))
}
