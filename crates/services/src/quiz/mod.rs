mod command;
mod controller;
mod view;

// Public API of the quiz subsystem.
pub use command::{CommandParseError, QuizCommand};
pub use controller::{INCOMPLETE_MESSAGE, QuizController, QuizEvent, Screen, TIME_EXPIRED_MESSAGE};
pub use view::{OptionView, QuestionView, QuizView};
