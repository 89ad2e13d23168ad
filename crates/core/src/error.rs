use thiserror::Error;

use crate::model::{QuestionBankError, QuestionError, QuizSettingsError, SnapshotError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
