use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::models::{LoginBody, RegisterBody};
use crate::rejections::{AppError, ResultExt};
use crate::{names, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::REGISTER_URL, post(register))
        .route(names::LOGIN_URL, post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Input("username and password are required"));
    }

    let exists = state
        .db
        .username_exists(&body.username)
        .await
        .reject("failed to check username")?;

    if exists {
        return Err(AppError::Input("User already exists"));
    }

    state
        .db
        .create_user(&body.username, &body.password, &body.fname, &body.lname)
        .await
        .reject("Error when signing up, please try again")?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully." })),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let valid = state
        .db
        .verify_user_password(&body.username, &body.password)
        .await
        .reject("failed to verify credentials")?;

    if !valid {
        return Err(AppError::Forbidden("Invalid credentials"));
    }

    let token = state
        .db
        .create_user_session(&body.username)
        .await
        .reject("failed to create session")?;

    Ok(Json(json!({ "token": token })))
}
