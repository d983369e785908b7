use quiz_core::model::{LessonId, ScoreRecord};

use super::SqliteRepository;
use super::mapping::map_score_row;
use crate::repository::{ScoreHistoryRepository, ScoreRow, StorageError};

fn connection(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl ScoreHistoryRepository for SqliteRepository {
    async fn append_score(&self, record: &ScoreRecord) -> Result<i64, StorageError> {
        let result = record.result();
        let res = sqlx::query(
            r"
                INSERT INTO score_history (
                    lesson_id, direction, outcome, score, correct, total, recorded_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(result.lesson_id().as_str())
        .bind(result.direction().as_str())
        .bind(result.end().as_str())
        .bind(i64::from(result.score()))
        .bind(i64::from(result.correct()))
        .bind(i64::from(result.total()))
        .bind(record.recorded_at())
        .execute(&self.pool)
        .await
        .map_err(connection)?;

        Ok(res.last_insert_rowid())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ScoreRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, lesson_id, direction, outcome, score, correct, total, recorded_at
                FROM score_history
                ORDER BY recorded_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(connection)?;

        rows.iter().map(map_score_row).collect()
    }

    async fn list_for_lesson(
        &self,
        lesson_id: &LessonId,
        limit: u32,
    ) -> Result<Vec<ScoreRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, lesson_id, direction, outcome, score, correct, total, recorded_at
                FROM score_history
                WHERE lesson_id = ?1
                ORDER BY recorded_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(lesson_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(connection)?;

        rows.iter().map(map_score_row).collect()
    }

    async fn best_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<ScoreRow>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, lesson_id, direction, outcome, score, correct, total, recorded_at
                FROM score_history
                WHERE lesson_id = ?1
                ORDER BY score DESC, recorded_at DESC, id DESC
                LIMIT 1
            ",
        )
        .bind(lesson_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(connection)?;

        row.as_ref().map(map_score_row).transpose()
    }
}
