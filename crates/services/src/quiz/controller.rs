use std::fmt;
use std::sync::Arc;

use quiz_core::model::{QuestionBank, QuizSettings, SessionState};
use quiz_core::{Countdown, QuizResult, SubmissionReason, TickOutcome};
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use super::command::QuizCommand;
use super::view::{QuestionView, QuizView};
use crate::error::QuizError;
use crate::notifier::Notifier;
use crate::progress_service::ProgressService;

/// Shown when a submission still has unanswered questions.
pub const INCOMPLETE_MESSAGE: &str = "Responda todas as perguntas antes de enviar.";

/// Sent to the notifier when the countdown runs out.
pub const TIME_EXPIRED_MESSAGE: &str = "Tempo esgotado! O quiz será finalizado.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Quiz,
    Result,
}

/// What a command did to the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// State changed; re-render.
    Rendered,
    /// Nothing changed.
    Ignored,
    /// One second passed on the countdown.
    Ticked(u32),
    /// Submission refused; moved to the first unanswered question.
    Incomplete { first_unanswered: usize },
    /// Attempt scored, either on completion or on expiry.
    Submitted(QuizResult),
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the single quiz attempt and reacts to `QuizCommand`s.
///
/// Each command runs to completion before the next, so callers that share a
/// controller only need to serialize `dispatch` calls.
pub struct QuizController {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    progress: ProgressService,
    notifier: Arc<dyn Notifier>,
    state: SessionState,
    countdown: Countdown,
    screen: Screen,
    error_message: Option<String>,
    result: Option<QuizResult>,
}

impl QuizController {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: QuizSettings,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = SessionState::new(bank.len(), settings.time_limit_secs());
        let progress = ProgressService::new(store, settings.storage_key());
        Self {
            bank,
            settings,
            progress,
            notifier,
            state,
            countdown: Countdown::new(),
            screen: Screen::Start,
            error_message: None,
            result: None,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    /// Everything the screens need for the current state.
    #[must_use]
    pub fn view(&self) -> QuizView {
        let question = match self.screen {
            Screen::Quiz => QuestionView::current(&self.bank, &self.state),
            Screen::Start | Screen::Result => None,
        };
        let in_quiz = self.screen == Screen::Quiz;

        QuizView {
            screen: self.screen,
            progress_percent: self.state.progress_percent(),
            time_remaining: self.state.time_remaining(),
            timer_running: self.countdown.is_running(),
            error_message: self.error_message.clone(),
            can_go_back: in_quiz && self.state.current_index() > 0,
            can_go_forward: in_quiz && self.state.current_answer().is_some(),
            is_last: self.state.is_last(),
            result: self.result.clone(),
            question,
        }
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────────
    //

    /// Route a command to its handler.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the command fails; see the individual handlers.
    pub async fn dispatch(&mut self, command: QuizCommand) -> Result<QuizEvent, QuizError> {
        if command != QuizCommand::Tick {
            debug!(%command, screen = ?self.screen, "dispatch");
        }
        match command {
            QuizCommand::Start => self.start().await,
            QuizCommand::Next => self.next().await,
            QuizCommand::Prev => Ok(self.prev()),
            QuizCommand::Select(option) => self.select_answer(option).await,
            QuizCommand::Submit => self.submit().await,
            QuizCommand::Reset => self.reset().await,
            QuizCommand::Tick => self.tick().await,
        }
    }

    /// Resume a saved attempt at launch, skipping the start screen.
    ///
    /// Without saved progress the start screen stays up and the countdown
    /// stays stopped.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if the store cannot be read.
    pub async fn boot(&mut self) -> Result<QuizEvent, QuizError> {
        if self.screen != Screen::Start {
            return Ok(QuizEvent::Ignored);
        }
        match self.progress.load_progress(self.bank.len()).await? {
            Some(state) => {
                self.resume(state);
                Ok(QuizEvent::Rendered)
            }
            None => Ok(QuizEvent::Ignored),
        }
    }

    /// Leave the start screen: restore saved progress or begin a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if the store cannot be read.
    pub async fn start(&mut self) -> Result<QuizEvent, QuizError> {
        if self.screen != Screen::Start {
            return Ok(QuizEvent::Ignored);
        }
        match self.progress.load_progress(self.bank.len()).await? {
            Some(state) => self.resume(state),
            None => {
                self.state = self.fresh_state();
                self.countdown.start(self.settings.time_limit_secs());
                self.error_message = None;
                self.screen = Screen::Quiz;
                info!(questions = self.bank.len(), "quiz started");
            }
        }
        Ok(QuizEvent::Rendered)
    }

    /// Record an answer for the current question and persist the snapshot.
    ///
    /// A question that already has an answer keeps it. If the save fails the
    /// answer is dropped again, so the question can still be answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` for an option index past the end, or
    /// `QuizError::Progress` if the snapshot cannot be saved.
    pub async fn select_answer(&mut self, option: usize) -> Result<QuizEvent, QuizError> {
        if self.screen != Screen::Quiz {
            return Ok(QuizEvent::Ignored);
        }
        let index = self.state.current_index();
        let text = self
            .bank
            .get(index)
            .and_then(|question| question.option(option))
            .ok_or(QuizError::InvalidOption {
                question: index,
                option,
            })?
            .to_string();

        let previous = self.state.clone();
        if !self.state.record_answer(text) {
            return Ok(QuizEvent::Ignored);
        }
        // an answer that was never stored stays selectable
        if let Err(err) = self.progress.save_progress(&self.state).await {
            warn!(question = index, error = %err, "answer not saved, rolling back");
            self.state = previous;
            return Err(err.into());
        }
        Ok(QuizEvent::Rendered)
    }

    /// Advance, or validate and submit from the last question.
    ///
    /// Does nothing until the current question is answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if submission cannot clear saved progress.
    pub async fn next(&mut self) -> Result<QuizEvent, QuizError> {
        if self.screen != Screen::Quiz || self.state.current_answer().is_none() {
            return Ok(QuizEvent::Ignored);
        }
        if self.state.advance() {
            return Ok(QuizEvent::Rendered);
        }
        self.validate_and_submit().await
    }

    /// Step back one question. No wraparound.
    pub fn prev(&mut self) -> QuizEvent {
        if self.screen != Screen::Quiz || !self.state.retreat() {
            return QuizEvent::Ignored;
        }
        QuizEvent::Rendered
    }

    /// Manual submission. Never scores a partial attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if saved progress cannot be cleared.
    pub async fn submit(&mut self) -> Result<QuizEvent, QuizError> {
        if self.screen != Screen::Quiz {
            return Ok(QuizEvent::Ignored);
        }
        self.validate_and_submit().await
    }

    /// Throw the attempt away and return to the start screen.
    ///
    /// The countdown is re-armed at the full limit right away.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if saved progress cannot be cleared.
    pub async fn reset(&mut self) -> Result<QuizEvent, QuizError> {
        self.countdown.stop();
        self.state = self.fresh_state();
        self.error_message = None;
        self.result = None;
        self.screen = Screen::Start;
        self.progress.clear_progress().await?;
        self.countdown.start(self.settings.time_limit_secs());
        info!("quiz reset");
        Ok(QuizEvent::Rendered)
    }

    /// Advance the countdown by one second, submitting on expiry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Progress` if an expiry submission cannot clear
    /// saved progress.
    pub async fn tick(&mut self) -> Result<QuizEvent, QuizError> {
        match self.countdown.tick() {
            TickOutcome::Idle => Ok(QuizEvent::Ignored),
            TickOutcome::Ticked(remaining) => {
                self.state.set_time_remaining(remaining);
                Ok(QuizEvent::Ticked(remaining))
            }
            TickOutcome::Expired => {
                self.state.set_time_remaining(0);
                self.notifier.notify(TIME_EXPIRED_MESSAGE);
                self.finish(SubmissionReason::TimeExpired).await
            }
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn fresh_state(&self) -> SessionState {
        SessionState::new(self.bank.len(), self.settings.time_limit_secs())
    }

    fn resume(&mut self, state: SessionState) {
        info!(
            index = state.current_index(),
            answered = state.answered_count(),
            time_remaining = state.time_remaining(),
            "resuming saved quiz"
        );
        self.countdown.start(state.time_remaining());
        self.state = state;
        self.error_message = None;
        self.screen = Screen::Quiz;
    }

    async fn validate_and_submit(&mut self) -> Result<QuizEvent, QuizError> {
        match self.state.first_unanswered() {
            None => self.finish(SubmissionReason::Completed).await,
            Some(first_unanswered) => {
                self.state.move_to(first_unanswered);
                self.error_message = Some(INCOMPLETE_MESSAGE.to_string());
                debug!(first_unanswered, "submission refused");
                Ok(QuizEvent::Incomplete { first_unanswered })
            }
        }
    }

    async fn finish(&mut self, reason: SubmissionReason) -> Result<QuizEvent, QuizError> {
        self.countdown.stop();
        let result = QuizResult::evaluate(&self.bank, self.state.answers(), reason);
        info!(
            score = result.score(),
            total = result.total(),
            ?reason,
            "quiz submitted"
        );
        self.result = Some(result.clone());
        self.screen = Screen::Result;
        self.progress.clear_progress().await?;
        Ok(QuizEvent::Submitted(result))
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("questions", &self.bank.len())
            .field("screen", &self.screen)
            .field("state", &self.state)
            .field("countdown", &self.countdown)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use storage::repository::InMemoryStore;

    fn controller() -> QuizController {
        let bank = QuestionBank::from_rows([
            ("Q1", ["a", "b", "c", "d"], "a"),
            ("Q2", ["a", "b", "c", "d"], "b"),
        ])
        .unwrap();
        QuizController::new(
            Arc::new(bank),
            QuizSettings::default(),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    #[tokio::test]
    async fn commands_before_start_are_ignored() {
        let mut quiz = controller();
        assert_eq!(quiz.dispatch(QuizCommand::Next).await.unwrap(), QuizEvent::Ignored);
        assert_eq!(quiz.dispatch(QuizCommand::Select(0)).await.unwrap(), QuizEvent::Ignored);
        assert_eq!(quiz.dispatch(QuizCommand::Submit).await.unwrap(), QuizEvent::Ignored);
        assert_eq!(quiz.dispatch(QuizCommand::Tick).await.unwrap(), QuizEvent::Ignored);
        assert_eq!(quiz.screen(), Screen::Start);
    }

    #[tokio::test]
    async fn start_arms_countdown_and_shows_first_question() {
        let mut quiz = controller();
        quiz.dispatch(QuizCommand::Start).await.unwrap();

        let view = quiz.view();
        assert_eq!(view.screen, Screen::Quiz);
        assert!(view.timer_running);
        assert_eq!(view.time_remaining, 60);
        assert!(!view.can_go_forward);
        assert!(!view.can_go_back);
        assert_eq!(view.question.unwrap().text, "Q1");
    }

    #[tokio::test]
    async fn invalid_option_is_an_error() {
        let mut quiz = controller();
        quiz.start().await.unwrap();
        let err = quiz.select_answer(4).await.unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidOption {
                question: 0,
                option: 4
            }
        ));
        assert_eq!(quiz.state().current_answer(), None);
    }

    #[tokio::test]
    async fn second_selection_keeps_first_answer() {
        let mut quiz = controller();
        quiz.start().await.unwrap();
        assert_eq!(quiz.select_answer(1).await.unwrap(), QuizEvent::Rendered);
        assert_eq!(quiz.select_answer(0).await.unwrap(), QuizEvent::Ignored);
        assert_eq!(quiz.state().current_answer(), Some("b"));
        assert!(quiz.view().can_go_forward);
    }

    #[tokio::test]
    async fn ticks_update_remaining_time() {
        let mut quiz = controller();
        quiz.start().await.unwrap();
        assert_eq!(quiz.tick().await.unwrap(), QuizEvent::Ticked(59));
        assert_eq!(quiz.state().time_remaining(), 59);
    }
}
