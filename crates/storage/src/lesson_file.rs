//! Static lesson document: `{ "<lesson id>": { "<term>": "<translation>" } }`.
//!
//! The document is read once at startup. Lesson order and word order follow
//! the file.

use std::fmt;
use std::path::Path;

use quiz_core::model::{Lesson, LessonId, WordList};
use serde::Deserialize;
use serde::de::{self, MapAccess, Visitor};

use crate::repository::{InMemoryRepository, StorageError};

/// Every lesson from a lesson document, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDocument {
    lessons: Vec<Lesson>,
}

impl LessonDocument {
    /// Parse a lesson document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON, blank lesson
    /// ids, blank terms or non-string translations.
    pub fn from_json(text: &str) -> Result<Self, StorageError> {
        serde_json::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Read and parse a lesson document from disk.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the file cannot be read, or the
    /// errors of [`LessonDocument::from_json`].
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        let document = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            lessons = document.lessons.len(),
            "loaded lesson document"
        );
        Ok(document)
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn into_repository(self) -> InMemoryRepository {
        InMemoryRepository::with_lessons(self.lessons)
    }
}

impl<'de> Deserialize<'de> for LessonDocument {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = LessonDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping lesson ids to word lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut lessons: Vec<Lesson> = Vec::new();
                while let Some((id, words)) = map.next_entry::<LessonId, WordList>()? {
                    let lesson = Lesson::new(id, words);
                    match lessons.iter_mut().find(|l| l.id() == lesson.id()) {
                        Some(existing) => *existing = lesson,
                        None => lessons.push(lesson),
                    }
                }
                Ok(LessonDocument { lessons })
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
