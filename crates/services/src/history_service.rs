use std::sync::Arc;

use quiz_core::model::{LessonId, ScoreRecord, SessionResult};
use quiz_core::time::Clock;
use storage::repository::{ScoreHistoryRepository, ScoreRow};

use crate::error::HistoryError;

/// Records finished and failed quiz runs.
#[derive(Clone)]
pub struct ScoreHistoryService {
    clock: Clock,
    scores: Arc<dyn ScoreHistoryRepository>,
}

impl ScoreHistoryService {
    #[must_use]
    pub fn new(clock: Clock, scores: Arc<dyn ScoreHistoryRepository>) -> Self {
        Self { clock, scores }
    }

    /// Stamp a session result with the current time and append it.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the record cannot be stored.
    pub async fn record(&self, result: &SessionResult) -> Result<i64, HistoryError> {
        let record = ScoreRecord::new(result.clone(), self.clock.now());
        let id = self.scores.append_score(&record).await?;
        tracing::info!(
            id,
            lesson = %result.lesson_id(),
            direction = result.direction().as_str(),
            outcome = result.end().as_str(),
            score = result.score(),
            "recorded quiz score"
        );
        Ok(id)
    }

    /// Newest records first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the history cannot be read.
    pub async fn recent(&self, limit: u32) -> Result<Vec<ScoreRow>, HistoryError> {
        Ok(self.scores.list_recent(limit).await?)
    }

    /// Newest records first for one lesson.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the history cannot be read.
    pub async fn for_lesson(
        &self,
        lesson_id: &LessonId,
        limit: u32,
    ) -> Result<Vec<ScoreRow>, HistoryError> {
        Ok(self.scores.list_for_lesson(lesson_id, limit).await?)
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the history cannot be read.
    pub async fn best_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<ScoreRow>, HistoryError> {
        Ok(self.scores.best_for_lesson(lesson_id).await?)
    }
}
