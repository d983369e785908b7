//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{LessonId, ScoreRecordError};
use quiz_core::{GenerateError, SessionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson {0} not found")]
    NotFound(LessonId),
    /// The lesson source could not be reached. Nothing is retried.
    #[error("failed to fetch lessons: {0}")]
    Fetch(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the remote lesson client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteLessonsError {
    #[error("lesson server returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid lesson server url: {0}")]
    InvalidUrl(String),
}

/// Errors emitted by `ScoreHistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Record(#[from] ScoreRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by quiz services and the quiz runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz is running")]
    NoActiveSession,
    #[error(transparent)]
    Lesson(#[from] LessonServiceError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Remote(#[from] RemoteLessonsError),
}
