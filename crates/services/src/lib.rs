#![forbid(unsafe_code)]

pub mod error;
pub mod notifier;
pub mod progress_service;
pub mod quiz;

pub use error::{ProgressError, QuizError};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use progress_service::{ProgressService, StoredProgress};
pub use quiz::{
    CommandParseError, INCOMPLETE_MESSAGE, OptionView, QuestionView, QuizCommand, QuizController,
    QuizEvent, QuizView, Screen, TIME_EXPIRED_MESSAGE,
};
