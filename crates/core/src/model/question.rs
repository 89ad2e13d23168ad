use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("correct answer is not one of the options: {0}")]
    UnknownCorrectAnswer(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Options are unique, so the option text doubles as the identity of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is empty, the option count is not
    /// `OPTIONS_PER_QUESTION`, an option repeats, or the correct answer is not
    /// one of the options.
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                expected: OPTIONS_PER_QUESTION,
                actual: options.len(),
            });
        }
        for (idx, option) in options.iter().enumerate() {
            if options[..idx].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::UnknownCorrectAnswer(correct_answer));
        }

        Ok(Self {
            text,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Option text at `index`, if any.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Position of the option whose text equals `answer`.
    #[must_use]
    pub fn option_index(&self, answer: &str) -> Option<usize> {
        self.options.iter().position(|option| option == answer)
    }

    #[must_use]
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }
}
