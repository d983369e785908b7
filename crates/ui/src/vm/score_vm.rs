use quiz_core::model::{SessionEnd, SessionResult};
use storage::repository::ScoreRow;

use crate::vm::lesson_vm::direction_label;
use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRowVm {
    pub id: i64,
    pub lesson: String,
    pub direction: &'static str,
    pub outcome: &'static str,
    pub score: u32,
    pub progress: String,
    pub recorded_at_str: String,
}

impl From<&ScoreRow> for ScoreRowVm {
    fn from(row: &ScoreRow) -> Self {
        let result = row.record.result();
        Self {
            id: row.id,
            lesson: result.lesson_id().to_string(),
            direction: direction_label(result.direction()),
            outcome: outcome_label(result.end()),
            score: result.score(),
            progress: format!("{}/{}", result.correct(), result.total()),
            recorded_at_str: format_datetime(row.record.recorded_at()),
        }
    }
}

#[must_use]
pub fn map_score_rows(rows: &[ScoreRow]) -> Vec<ScoreRowVm> {
    rows.iter().map(ScoreRowVm::from).collect()
}

#[must_use]
pub fn outcome_label(end: SessionEnd) -> &'static str {
    match end {
        SessionEnd::Finished => "Finished",
        SessionEnd::Failed => "Missed",
    }
}

/// One-line summary shown after a run.
#[must_use]
pub fn result_summary(result: &SessionResult) -> String {
    format!(
        "Lesson {}: {} points ({} of {} correct)",
        result.lesson_id(),
        result.score(),
        result.correct(),
        result.total()
    )
}
