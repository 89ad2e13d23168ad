mod bank;
mod question;
mod session;
mod settings;

pub use bank::{QuestionBank, QuestionBankError};
pub use question::{OPTIONS_PER_QUESTION, Question, QuestionError};
pub use session::{SessionState, Snapshot, SnapshotError};
pub use settings::{DEFAULT_STORAGE_KEY, DEFAULT_TIME_LIMIT_SECS, QuizSettings, QuizSettingsError};
