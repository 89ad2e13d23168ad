use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a stored snapshot cannot be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    #[error("snapshot has {actual} answers, expected {expected}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("snapshot index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Persisted form of a session. The score is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(alias = "currentQuestionIndex")]
    pub current_index: usize,
    #[serde(alias = "userAnswers")]
    pub answers: Vec<Option<String>>,
    #[serde(alias = "timeLeft")]
    pub time_remaining: u32,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Mutable state of one quiz attempt.
///
/// `answers` is index-aligned with the question bank; `None` means unanswered.
/// Recorded answers are never cleared except by building a fresh state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_index: usize,
    answers: Vec<Option<String>>,
    time_remaining: u32,
}

impl SessionState {
    /// Fresh state: first question, nothing answered, full time.
    ///
    /// # Panics
    ///
    /// Panics if `question_count` is zero.
    #[must_use]
    pub fn new(question_count: usize, time_limit_secs: u32) -> Self {
        assert!(question_count > 0, "a session needs at least one question");
        Self {
            current_index: 0,
            answers: vec![None; question_count],
            time_remaining: time_limit_secs,
        }
    }

    /// Rebuild state from a stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the answer count differs from `question_count`
    /// or the index points past the last question.
    pub fn from_snapshot(snapshot: Snapshot, question_count: usize) -> Result<Self, SnapshotError> {
        if snapshot.answers.len() != question_count {
            return Err(SnapshotError::AnswerCountMismatch {
                expected: question_count,
                actual: snapshot.answers.len(),
            });
        }
        if snapshot.current_index >= question_count {
            return Err(SnapshotError::IndexOutOfRange {
                index: snapshot.current_index,
                len: question_count,
            });
        }
        Ok(Self {
            current_index: snapshot.current_index,
            answers: snapshot.answers,
            time_remaining: snapshot.time_remaining,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_index: self.current_index,
            answers: self.answers.clone(),
            time_remaining: self.time_remaining,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answer(self.current_index)
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn set_time_remaining(&mut self, secs: u32) {
        self.time_remaining = secs;
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.answers.len()
    }

    /// Record an answer for the current question.
    ///
    /// Returns `false` without touching state if one is already recorded.
    pub fn record_answer(&mut self, answer: impl Into<String>) -> bool {
        let slot = &mut self.answers[self.current_index];
        if slot.is_some() {
            return false;
        }
        *slot = Some(answer.into());
        true
    }

    /// Move forward one question. Returns `false` on the last question.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Move back one question. Returns `false` on the first question.
    pub fn retreat(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn move_to(&mut self, index: usize) -> bool {
        if index >= self.answers.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    #[must_use]
    pub fn first_unanswered(&self) -> Option<usize> {
        self.answers.iter().position(Option::is_none)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first_unanswered().is_none()
    }

    /// Share of the quiz already passed, based on the current position.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f32 {
        self.current_index as f32 / self.answers.len() as f32 * 100.0
    }
}
