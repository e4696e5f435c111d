pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod sampling;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::account::routes())
        .merge(handlers::flashcard::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::marathon::routes())
        .merge(handlers::stats::routes())
        .with_state(state)
}
