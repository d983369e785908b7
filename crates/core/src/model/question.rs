use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of options shown for every question.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected 4 options, got {got}")]
    OptionCount { got: usize },

    #[error("duplicate option: {option:?}")]
    DuplicateOption { option: String },

    #[error("options do not contain the correct answer {answer:?}")]
    MissingAnswer { answer: String },
}

/// A single multiple-choice question.
///
/// Options always hold exactly [`OPTION_COUNT`] distinct strings, one of which
/// is the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionParts")]
pub struct QuestionItem {
    prompt: String,
    correct_answer: String,
    options: Vec<String>,
}

#[derive(Deserialize)]
struct QuestionParts {
    prompt: String,
    correct_answer: String,
    options: Vec<String>,
}

impl TryFrom<QuestionParts> for QuestionItem {
    type Error = QuestionError;

    fn try_from(parts: QuestionParts) -> Result<Self, Self::Error> {
        Self::new(parts.prompt, parts.correct_answer, parts.options)
    }
}

impl QuestionItem {
    /// Build a question item, validating the option invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the options are the wrong size, contain
    /// duplicates, or miss the correct answer.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        if options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount { got: options.len() });
        }
        let mut seen = HashSet::with_capacity(OPTION_COUNT);
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if !seen.contains(correct_answer.as_str()) {
            return Err(QuestionError::MissingAnswer {
                answer: correct_answer,
            });
        }

        Ok(Self {
            prompt: prompt.into(),
            correct_answer,
            options,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}
