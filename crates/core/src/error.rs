use thiserror::Error;

use crate::generator::GenerateError;
use crate::model::{LessonError, ParseIdError, QuestionError, ScoreRecordError};
use crate::quiz::SessionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    LessonId(#[from] ParseIdError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    ScoreRecord(#[from] ScoreRecordError),
}
