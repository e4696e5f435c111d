use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
    Insufficient(String),
    Unauthorized,
    Forbidden(&'static str),
    Input(&'static str),
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, error) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            AppError::Insufficient(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Token is required.".to_string(),
            ),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message.to_string()),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()),
        };

        (code, Json(json!({ "error": error }))).into_response()
    }
}

pub trait ResultExt<T> {
    /// Log the underlying error and surface a 500 with `message`.
    fn reject(self, message: &'static str) -> Result<T, AppError>;

    /// Log the underlying error and surface a 400 with `message`.
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{message}: {e}");
            AppError::Input(message)
        })
    }
}
