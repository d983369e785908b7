#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod quiz;
pub mod time;

pub use error::Error;
pub use generator::{GenerateError, QuestionGenerator};
pub use quiz::{Advance, AnswerOutcome, QuizSession, SessionError, SessionStatus};
pub use time::Clock;
