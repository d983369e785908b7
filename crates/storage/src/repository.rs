use async_trait::async_trait;
use quiz_core::model::{Lesson, LessonId, ScoreRecord};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-only lesson store.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// List every known lesson id. An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing source cannot be read.
    async fn list_lessons(&self) -> Result<Vec<LessonId>, StorageError>;

    /// Fetch one lesson with its word pairs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError>;
}

/// A persisted score with its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub id: i64,
    pub record: ScoreRecord,
}

impl ScoreRow {
    #[must_use]
    pub fn new(id: i64, record: ScoreRecord) -> Self {
        Self { id, record }
    }
}

/// Append-only history of finished and failed quiz sessions.
#[async_trait]
pub trait ScoreHistoryRepository: Send + Sync {
    /// Append a score and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_score(&self, record: &ScoreRecord) -> Result<i64, StorageError>;

    /// Newest scores first, across all lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn list_recent(&self, limit: u32) -> Result<Vec<ScoreRow>, StorageError>;

    /// Newest scores first for one lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn list_for_lesson(
        &self,
        lesson_id: &LessonId,
        limit: u32,
    ) -> Result<Vec<ScoreRow>, StorageError>;

    /// Highest score recorded for a lesson; ties go to the most recent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn best_for_lesson(&self, lesson_id: &LessonId)
    -> Result<Option<ScoreRow>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lessons: Arc<Mutex<Vec<Lesson>>>,
    scores: Arc<Mutex<Vec<ScoreRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lessons(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons: Arc::new(Mutex::new(lessons)),
            scores: Arc::default(),
        }
    }

    fn newest_first(
        &self,
        filter: impl Fn(&ScoreRow) -> bool,
        limit: u32,
    ) -> Result<Vec<ScoreRow>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<ScoreRow> = guard.iter().filter(|r| filter(r)).cloned().collect();
        rows.sort_by(|a, b| {
            b.record
                .recorded_at()
                .cmp(&a.record.recorded_at())
                .then_with(|| b.id.cmp(&a.id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn list_lessons(&self) -> Result<Vec<LessonId>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().map(|l| l.id().clone()).collect())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|l| l.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ScoreHistoryRepository for InMemoryRepository {
    async fn append_score(&self, record: &ScoreRecord) -> Result<i64, StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("score id overflow".into()))?
            + 1;
        guard.push(ScoreRow::new(id, record.clone()));
        Ok(id)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ScoreRow>, StorageError> {
        self.newest_first(|_| true, limit)
    }

    async fn list_for_lesson(
        &self,
        lesson_id: &LessonId,
        limit: u32,
    ) -> Result<Vec<ScoreRow>, StorageError> {
        self.newest_first(|r| r.record.lesson_id() == lesson_id, limit)
    }

    async fn best_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<ScoreRow>, StorageError> {
        let rows = self.newest_first(|r| r.record.lesson_id() == lesson_id, u32::MAX)?;
        // Rows are newest first, so keep the first row seen for each score.
        Ok(rows.into_iter().fold(None, |best: Option<ScoreRow>, row| match best {
            Some(b) if b.record.score() >= row.record.score() => Some(b),
            _ => Some(row),
        }))
    }
}

/// Aggregates lesson and score repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonRepository>,
    pub scores: Arc<dyn ScoreHistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::in_memory_with_lessons(Vec::new())
    }

    #[must_use]
    pub fn in_memory_with_lessons(lessons: Vec<Lesson>) -> Self {
        let repo = InMemoryRepository::with_lessons(lessons);
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let scores: Arc<dyn ScoreHistoryRepository> = Arc::new(repo);
        Self { lessons, scores }
    }

    /// Replace the lesson source, keeping the score history backend.
    #[must_use]
    pub fn with_lessons(mut self, lessons: Arc<dyn LessonRepository>) -> Self {
        self.lessons = lessons;
        self
    }
}
