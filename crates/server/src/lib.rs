//! HTTP surface over the lesson store.

#![forbid(unsafe_code)]

pub mod error;
pub mod routes;

use axum::Router;
use axum::routing::get;
use services::LessonService;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub lessons: LessonService,
}

fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route("/lessons", get(routes::list_lessons))
        .route("/lessons/{id}", get(routes::get_lesson))
}

/// Lesson routes at the root and again under `/api`.
pub fn router(lessons: LessonService) -> Router {
    Router::new()
        .merge(lesson_routes())
        .nest("/api", lesson_routes())
        .with_state(AppState { lessons })
}
