use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::extractors::AuthGuard;
use crate::models::{CreateFlashcardBody, FlashcardQuery, UpdateFlashcardBody};
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            names::FLASHCARDS_URL,
            get(list_flashcards).post(create_flashcard),
        )
        .route(
            "/flashcards/{id}",
            get(get_flashcard)
                .put(update_flashcard)
                .delete(delete_flashcard),
        )
        .route(names::CATEGORIES_URL, get(list_categories))
}

async fn list_flashcards(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Query(query): Query<FlashcardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let cards = state
        .db
        .list_flashcards(
            &user.username,
            query.category.as_deref(),
            query.difficulty_level,
        )
        .await
        .reject("failed to list flashcards")?;

    Ok(Json(cards))
}

async fn get_flashcard(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let card = state
        .db
        .get_flashcard(&id)
        .await
        .reject("failed to get flashcard")?
        .ok_or(AppError::NotFound("Flashcard not found"))?;

    Ok(Json(card))
}

async fn create_flashcard(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<CreateFlashcardBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.question.trim().is_empty() || body.answer.trim().is_empty() {
        return Err(AppError::Input("Invalid data"));
    }

    let card = state
        .db
        .create_flashcard(
            &user.username,
            &body.question,
            &body.answer,
            &body.category,
            body.difficulty_level,
            false,
        )
        .await
        .reject_input("failed to create flashcard")?;

    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_flashcard(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateFlashcardBody>,
) -> Result<impl IntoResponse, AppError> {
    let card = state
        .db
        .update_flashcard(&id, &body)
        .await
        .reject("failed to update flashcard")?
        .ok_or(AppError::NotFound("Flashcard not found"))?;

    Ok(Json(card))
}

async fn delete_flashcard(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_flashcard(&id)
        .await
        .reject("failed to delete flashcard")?;

    if !deleted {
        return Err(AppError::NotFound("Flashcard not found"));
    }

    Ok(Json(json!({
        "message": format!("Flashcard with ID {id} deleted successfully")
    })))
}

async fn list_categories(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = state
        .db
        .list_categories(&user.username)
        .await
        .reject("failed to list categories")?;

    Ok(Json(categories))
}
