use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Direction, LessonId};

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreRecordError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("score ({score}) does not match correct answers ({correct})")]
    ScoreMismatch { score: u32, correct: u32 },

    #[error("finished session must answer every question ({correct}/{total})")]
    IncompleteFinish { correct: u32, total: u32 },
}

/// How a quiz session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// Every question was answered correctly.
    Finished,
    /// A wrong answer (or an expired countdown) stopped the session.
    Failed,
}

impl SessionEnd {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "finished" => Some(Self::Finished),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Outcome of a quiz session, emitted once when it ends.
///
/// A failed session keeps the points earned before the miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    lesson_id: LessonId,
    direction: Direction,
    end: SessionEnd,
    correct: u32,
    total: u32,
}

impl SessionResult {
    /// # Errors
    ///
    /// Returns `ScoreRecordError` if the counts are inconsistent with `end`.
    pub fn new(
        lesson_id: LessonId,
        direction: Direction,
        end: SessionEnd,
        correct: u32,
        total: u32,
    ) -> Result<Self, ScoreRecordError> {
        if correct > total {
            return Err(ScoreRecordError::CorrectExceedsTotal { correct, total });
        }
        if end == SessionEnd::Finished && correct != total {
            return Err(ScoreRecordError::IncompleteFinish { correct, total });
        }
        Ok(Self {
            lesson_id,
            direction,
            end,
            correct,
            total,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn end(&self) -> SessionEnd {
        self.end
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.correct.saturating_mul(POINTS_PER_CORRECT)
    }
}

/// A session result stamped with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    result: SessionResult,
    recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(result: SessionResult, recorded_at: DateTime<Utc>) -> Self {
        Self {
            result,
            recorded_at,
        }
    }

    /// Rehydrate a score record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreRecordError` if the stored score disagrees with the
    /// stored counts.
    pub fn from_persisted(
        lesson_id: LessonId,
        direction: Direction,
        end: SessionEnd,
        score: u32,
        correct: u32,
        total: u32,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, ScoreRecordError> {
        let result = SessionResult::new(lesson_id, direction, end, correct, total)?;
        if result.score() != score {
            return Err(ScoreRecordError::ScoreMismatch { score, correct });
        }
        Ok(Self::new(result, recorded_at))
    }

    #[must_use]
    pub fn result(&self) -> &SessionResult {
        &self.result
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        self.result.lesson_id()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.result.score()
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn lesson() -> LessonId {
        LessonId::new("1").unwrap()
    }

    #[test]
    fn result_scores_ten_per_correct() {
        let result =
            SessionResult::new(lesson(), Direction::Forward, SessionEnd::Failed, 3, 5).unwrap();
        assert_eq!(result.score(), 30);
    }

    #[test]
    fn finished_result_requires_every_answer() {
        let err = SessionResult::new(lesson(), Direction::Forward, SessionEnd::Finished, 3, 5)
            .unwrap_err();
        assert_eq!(err, ScoreRecordError::IncompleteFinish { correct: 3, total: 5 });
    }

    #[test]
    fn persisted_record_checks_score() {
        let now = fixed_now();
        let ok = ScoreRecord::from_persisted(
            lesson(),
            Direction::Reverse,
            SessionEnd::Finished,
            40,
            4,
            4,
            now,
        )
        .unwrap();
        assert_eq!(ok.score(), 40);
        assert_eq!(ok.recorded_at(), now);

        let bad = ScoreRecord::from_persisted(
            lesson(),
            Direction::Reverse,
            SessionEnd::Failed,
            25,
            2,
            4,
            now,
        );
        assert_eq!(
            bad,
            Err(ScoreRecordError::ScoreMismatch {
                score: 25,
                correct: 2
            })
        );
    }
}
