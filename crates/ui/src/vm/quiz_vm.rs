use quiz_core::SessionStatus;
use services::{QuestionSnapshot, QuizSnapshot, Unavailable};

use crate::vm::score_vm::result_summary;
use crate::vm::time_fmt::format_countdown;

pub const OPTION_CLASS: &str = "option-button";
pub const OPTION_CORRECT_CLASS: &str = "option-button correct-answer";
pub const OPTION_WRONG_CLASS: &str = "option-button wrong-answer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub class: &'static str,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackVm {
    Correct,
    Wrong,
    TimedOut,
}

impl FeedbackVm {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong | Self::TimedOut => "wrong",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::Wrong => "Wrong answer.",
            Self::TimedOut => "Time's up.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
    pub score_label: String,
    pub timer_label: Option<String>,
}

impl From<&QuestionSnapshot> for QuestionVm {
    fn from(question: &QuestionSnapshot) -> Self {
        let feedback = match question.status {
            SessionStatus::Active => None,
            SessionStatus::AnsweredCorrect | SessionStatus::Finished => Some(FeedbackVm::Correct),
            SessionStatus::AnsweredWrong if question.timed_out() => Some(FeedbackVm::TimedOut),
            SessionStatus::AnsweredWrong => Some(FeedbackVm::Wrong),
        };
        let options = question
            .options
            .iter()
            .map(|option| OptionVm {
                label: option.clone(),
                class: option_class(question, option),
                disabled: question.is_answered(),
            })
            .collect();
        Self {
            heading: format!("Question {} of {}", question.number(), question.total),
            prompt: question.prompt.clone(),
            options,
            feedback,
            score_label: format!("Score: {}", question.score),
            timer_label: question.remaining_secs.map(format_countdown),
        }
    }
}

/// Button class for one option.
///
/// After a miss the right answer is highlighted and the picked option is
/// marked wrong. After a hit only the picked option is highlighted.
#[must_use]
pub fn option_class(question: &QuestionSnapshot, option: &str) -> &'static str {
    let selected = question.selected.as_deref() == Some(option);
    let correct = question.correct_answer.as_deref() == Some(option);
    match question.status {
        SessionStatus::AnsweredWrong if correct => OPTION_CORRECT_CLASS,
        SessionStatus::AnsweredWrong if selected => OPTION_WRONG_CLASS,
        SessionStatus::AnsweredCorrect | SessionStatus::Finished if selected => {
            OPTION_CORRECT_CLASS
        }
        _ => OPTION_CLASS,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreenVm {
    Loading,
    Message { title: &'static str, detail: String },
    Question(QuestionVm),
    Ended { summary: String, passed: bool },
}

#[must_use]
pub fn map_quiz_snapshot(snapshot: &QuizSnapshot) -> QuizScreenVm {
    match snapshot {
        QuizSnapshot::Idle | QuizSnapshot::Loading { .. } => QuizScreenVm::Loading,
        QuizSnapshot::Unavailable { lesson_id, reason } => {
            let (title, detail) = match reason {
                Unavailable::NotFound => {
                    ("Lesson not found", format!("There is no lesson {lesson_id}."))
                }
                Unavailable::NoQuestions { available } => (
                    "No questions in this lesson",
                    format!("Lesson {lesson_id} has {available} distinct answers; at least 4 are needed."),
                ),
                Unavailable::Offline => (
                    "Lessons unavailable",
                    "The lesson source could not be reached.".to_string(),
                ),
            };
            QuizScreenVm::Message { title, detail }
        }
        QuizSnapshot::Question(question) => QuizScreenVm::Question(QuestionVm::from(question)),
        QuizSnapshot::Ended(result) => QuizScreenVm::Ended {
            summary: result_summary(result),
            passed: result.correct() == result.total(),
        },
    }
}
