use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use services::LessonServiceError;
use thiserror::Error;

/// Handler errors mapped to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("lesson {0} not found")]
    LessonNotFound(String),
    #[error("lessons unavailable: {0}")]
    Unavailable(String),
}

impl From<LessonServiceError> for ApiError {
    fn from(err: LessonServiceError) -> Self {
        match err {
            LessonServiceError::NotFound(id) => Self::LessonNotFound(id.into()),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::LessonNotFound(lesson) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "lesson not found", "lesson": lesson })),
            )
                .into_response(),
            Self::Unavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "message": message })),
            )
                .into_response(),
        }
    }
}
