mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    QuestionVm, QuizVm, ResultVm, ReviewRowVm, UNANSWERED_LABEL, dispatch_command,
    load_from_context, load_quiz, tick_after_load,
};
pub use time_fmt::{format_time_remaining, progress_style};
