#![forbid(unsafe_code)]

pub mod lesson_file;
pub mod repository;
pub mod sqlite;

pub use lesson_file::LessonDocument;
pub use repository::{
    InMemoryRepository, LessonRepository, ScoreHistoryRepository, ScoreRow, Storage, StorageError,
};
