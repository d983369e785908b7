use quiz_core::model::{Direction, LessonId, SessionResult};
use quiz_core::{GenerateError, QuizSession, SessionError, SessionStatus};

use crate::error::{LessonServiceError, QuizError};

/// Why a quiz could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The lesson id is unknown.
    NotFound,
    /// The lesson exists but cannot produce a four-option quiz.
    NoQuestions { available: usize },
    /// The lesson source could not be reached.
    Offline,
}

impl Unavailable {
    #[must_use]
    pub fn from_error(err: &QuizError) -> Self {
        match err {
            QuizError::Lesson(LessonServiceError::NotFound(_)) => Self::NotFound,
            QuizError::Generate(GenerateError::InsufficientPairs { available, .. }) => {
                Self::NoQuestions {
                    available: *available,
                }
            }
            QuizError::Session(SessionError::Empty) => Self::NoQuestions { available: 0 },
            _ => Self::Offline,
        }
    }
}

/// What the quiz screen should show for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSnapshot {
    pub lesson_id: LessonId,
    pub direction: Direction,
    /// Zero-based question index.
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub score: u32,
    pub status: SessionStatus,
    /// The option picked for the current question, if any.
    pub selected: Option<String>,
    /// Revealed once the question has been answered.
    pub correct_answer: Option<String>,
    /// Countdown seconds left, when a time limit is configured.
    pub remaining_secs: Option<u64>,
}

impl QuestionSnapshot {
    #[must_use]
    pub fn from_session(session: &QuizSession, remaining_secs: Option<u64>) -> Self {
        let question = session.current_question();
        let answered = session.status() != SessionStatus::Active;
        Self {
            lesson_id: session.lesson_id().clone(),
            direction: session.direction(),
            index: session.current_index(),
            total: session.total(),
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            score: session.score(),
            status: session.status(),
            selected: session.selected().map(str::to_owned),
            correct_answer: answered.then(|| question.correct_answer().to_owned()),
            remaining_secs,
        }
    }

    /// One-based position for display.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.status != SessionStatus::Active
    }

    /// The countdown ran out before an option was picked.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.status == SessionStatus::AnsweredWrong && self.selected.is_none()
    }
}

/// Observable state of the quiz runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizSnapshot {
    #[default]
    Idle,
    Loading {
        lesson_id: LessonId,
        direction: Direction,
    },
    Unavailable {
        lesson_id: LessonId,
        reason: Unavailable,
    },
    Question(QuestionSnapshot),
    Ended(SessionResult),
}

impl QuizSnapshot {
    #[must_use]
    pub fn question(&self) -> Option<&QuestionSnapshot> {
        match self {
            Self::Question(question) => Some(question),
            _ => None,
        }
    }

    #[must_use]
    pub fn ended(&self) -> Option<&SessionResult> {
        match self {
            Self::Ended(result) => Some(result),
            _ => None,
        }
    }
}
