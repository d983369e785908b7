use quiz_core::model::{Direction, LessonId, ScoreRecord, SessionEnd};
use sqlx::Row;

use crate::repository::{ScoreRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn parse_direction(s: &str) -> Result<Direction, StorageError> {
    Direction::parse(s)
        .ok_or_else(|| StorageError::Serialization(format!("invalid direction: {s}")))
}

pub(crate) fn parse_outcome(s: &str) -> Result<SessionEnd, StorageError> {
    SessionEnd::parse(s).ok_or_else(|| StorageError::Serialization(format!("invalid outcome: {s}")))
}

pub(crate) fn map_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRow, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let lesson_id = LessonId::new(row.try_get::<String, _>("lesson_id").map_err(ser)?)
        .map_err(ser)?;
    let direction = parse_direction(&row.try_get::<String, _>("direction").map_err(ser)?)?;
    let outcome = parse_outcome(&row.try_get::<String, _>("outcome").map_err(ser)?)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let correct = u32_from_i64("correct", row.try_get::<i64, _>("correct").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    let recorded_at = row.try_get("recorded_at").map_err(ser)?;

    let record = ScoreRecord::from_persisted(
        lesson_id,
        direction,
        outcome,
        score,
        correct,
        total,
        recorded_at,
    )
    .map_err(ser)?;
    Ok(ScoreRow::new(id, record))
}
