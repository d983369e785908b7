use std::sync::Arc;

use quiz_core::model::{Lesson, LessonId};
use storage::repository::{LessonRepository, StorageError};

use crate::error::LessonServiceError;

/// Read access to lessons for the server and the quiz flow.
#[derive(Clone)]
pub struct LessonService {
    lessons: Arc<dyn LessonRepository>,
}

impl LessonService {
    #[must_use]
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self { lessons }
    }

    /// List every lesson id.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Fetch` if the lesson source is unreachable.
    pub async fn list_lessons(&self) -> Result<Vec<LessonId>, LessonServiceError> {
        self.lessons.list_lessons().await.map_err(|err| {
            tracing::warn!(error = %err, "listing lessons failed");
            map_storage_error(err, None)
        })
    }

    /// Fetch one lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for unknown ids and
    /// `LessonServiceError::Fetch` if the lesson source is unreachable.
    pub async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, LessonServiceError> {
        match self.lessons.get_lesson(id).await {
            Ok(lesson) => {
                tracing::debug!(lesson = %id, pairs = lesson.pairs().len(), "fetched lesson");
                Ok(lesson)
            }
            Err(StorageError::NotFound) => Err(LessonServiceError::NotFound(id.clone())),
            Err(err) => {
                tracing::warn!(lesson = %id, error = %err, "fetching lesson failed");
                Err(map_storage_error(err, Some(id)))
            }
        }
    }
}

fn map_storage_error(err: StorageError, id: Option<&LessonId>) -> LessonServiceError {
    match (err, id) {
        (StorageError::NotFound, Some(id)) => LessonServiceError::NotFound(id.clone()),
        (StorageError::Connection(message), _) => LessonServiceError::Fetch(message),
        (err, _) => LessonServiceError::Storage(err),
    }
}
