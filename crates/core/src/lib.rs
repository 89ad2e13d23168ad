#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod scoring;
pub mod timer;

pub use error::Error;
pub use scoring::{NO_ANSWER, QuizResult, ReviewItem, SubmissionReason, build_review, calculate_score};
pub use timer::{Countdown, CountdownState, TickOutcome};
