use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Direction, LessonId, POINTS_PER_CORRECT, QuestionItem, ScoreRecordError, SessionEnd,
    SessionResult,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("session is not waiting for an answer (status: {status:?})")]
    NotAwaitingAnswer { status: SessionStatus },

    #[error("no answer to acknowledge (status: {status:?})")]
    NothingToAcknowledge { status: SessionStatus },

    #[error("session already ended")]
    Ended,

    #[error("too many questions for a single session: {len}")]
    TooManyQuestions { len: usize },

    #[error(transparent)]
    Result(#[from] ScoreRecordError),
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting for an answer to the current question.
    Active,
    /// The last answer was right; feedback is showing.
    AnsweredCorrect,
    /// The last answer was wrong (or the countdown expired); feedback is showing.
    AnsweredWrong,
    /// Every question was answered correctly.
    Finished,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { score: u32 },
    Wrong { correct_answer: String },
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }
}

/// Result of acknowledging answer feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The session is over.
    Ended(SessionResult),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A single run through a lesson's questions.
///
/// Answers are scored [`POINTS_PER_CORRECT`] each. The first wrong answer
/// ends the run; the points earned up to that point are kept in the
/// resulting [`SessionResult`].
///
/// Transitions:
///
/// ```text
/// Active --submit(correct)--> AnsweredCorrect --acknowledge--> Active | Finished
/// Active --submit(wrong)----> AnsweredWrong   --acknowledge--> (ended)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    lesson_id: LessonId,
    direction: Direction,
    questions: Vec<QuestionItem>,
    current: usize,
    score: u32,
    correct: u32,
    status: SessionStatus,
    selected: Option<String>,
    ended: Option<SessionEnd>,
}

impl QuizSession {
    /// Start a session over pre-generated questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn new(
        lesson_id: LessonId,
        direction: Direction,
        questions: Vec<QuestionItem>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        if u32::try_from(questions.len()).is_err() {
            return Err(SessionError::TooManyQuestions {
                len: questions.len(),
            });
        }

        Ok(Self {
            lesson_id,
            direction,
            questions,
            current: 0,
            score: 0,
            correct: 0,
            status: SessionStatus::Active,
            selected: None,
            ended: None,
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
    pub fn questions(&self) -> &[QuestionItem] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &QuestionItem {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The option picked for the current question, if any.
    ///
    /// `None` while waiting for an answer and after an expired countdown.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// How the session ended, once it has.
    #[must_use]
    pub fn ended(&self) -> Option<SessionEnd> {
        self.ended
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    /// Answer the current question. `None` never matches, so it counts as wrong.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after the session is over, or
    /// `SessionError::NotAwaitingAnswer` while feedback is pending.
    pub fn submit_answer(&mut self, choice: Option<&str>) -> Result<AnswerOutcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::Ended);
        }
        if self.status != SessionStatus::Active {
            return Err(SessionError::NotAwaitingAnswer {
                status: self.status,
            });
        }

        let question = &self.questions[self.current];
        let is_correct = choice.is_some_and(|c| question.is_correct(c));
        self.selected = choice.map(str::to_owned);

        if is_correct {
            self.score = self.score.saturating_add(POINTS_PER_CORRECT);
            self.correct = self.correct.saturating_add(1);
            self.status = SessionStatus::AnsweredCorrect;
            Ok(AnswerOutcome::Correct { score: self.score })
        } else {
            self.status = SessionStatus::AnsweredWrong;
            Ok(AnswerOutcome::Wrong {
                correct_answer: question.correct_answer().to_owned(),
            })
        }
    }

    /// The countdown for the current question ran out.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::submit_answer`].
    pub fn expire(&mut self) -> Result<AnswerOutcome, SessionError> {
        self.submit_answer(None)
    }

    /// Leave the feedback state: advance, finish, or end after a miss.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after the session is over, or
    /// `SessionError::NothingToAcknowledge` while waiting for an answer.
    pub fn acknowledge(&mut self) -> Result<Advance, SessionError> {
        if self.is_over() {
            return Err(SessionError::Ended);
        }
        match self.status {
            SessionStatus::AnsweredCorrect => {
                self.selected = None;
                if self.current + 1 < self.questions.len() {
                    self.current += 1;
                    self.status = SessionStatus::Active;
                    Ok(Advance::Next {
                        index: self.current,
                    })
                } else {
                    self.status = SessionStatus::Finished;
                    self.end(SessionEnd::Finished).map(Advance::Ended)
                }
            }
            SessionStatus::AnsweredWrong => self.end(SessionEnd::Failed).map(Advance::Ended),
            status => Err(SessionError::NothingToAcknowledge { status }),
        }
    }

    fn end(&mut self, end: SessionEnd) -> Result<SessionResult, SessionError> {
        let total = u32::try_from(self.questions.len()).map_err(|_| {
            SessionError::TooManyQuestions {
                len: self.questions.len(),
            }
        })?;
        let result =
            SessionResult::new(self.lesson_id.clone(), self.direction, end, self.correct, total)?;
        self.ended = Some(end);
        Ok(result)
    }
}
