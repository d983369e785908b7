use axum::Json;
use axum::extract::{Path, State};
use quiz_core::model::{LessonId, WordList};

use crate::AppState;
use crate::error::ApiError;

/// `GET /lessons`: every lesson id, in document order.
pub async fn list_lessons(State(state): State<AppState>) -> Result<Json<Vec<LessonId>>, ApiError> {
    let ids = state.lessons.list_lessons().await?;
    tracing::debug!(count = ids.len(), "listed lessons");
    Ok(Json(ids))
}

/// `GET /lessons/{id}`: the lesson's term to translation map.
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WordList>, ApiError> {
    // Ids match literally; a padded segment is a different key.
    let lesson_id = match LessonId::new(id.as_str()) {
        Ok(lesson_id) if lesson_id.as_str() == id => lesson_id,
        _ => return Err(ApiError::LessonNotFound(id)),
    };
    match state.lessons.get_lesson(&lesson_id).await {
        Ok(lesson) => {
            let (_, words) = lesson.into_parts();
            Ok(Json(words))
        }
        Err(err) => {
            tracing::info!(lesson = %lesson_id, error = %err, "lesson request failed");
            Err(err.into())
        }
    }
}
