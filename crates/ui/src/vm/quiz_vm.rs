use quiz_core::{QuizResult, ReviewItem, SubmissionReason};
use services::{OptionView, QuestionView, QuizCommand, QuizController, QuizError, QuizView, Screen};
use tokio::sync::Mutex;
use tracing::warn;

use super::time_fmt::{format_time_remaining, progress_style};
use crate::context::AppContext;
use crate::views::ViewError;

/// Shown in the review list for a question left blank.
pub const UNANSWERED_LABEL: &str = "Nenhuma resposta";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub text: String,
    pub options: Vec<OptionView>,
    pub answered: bool,
}

impl QuestionVm {
    fn from_view(question: &QuestionView) -> Self {
        Self {
            heading: format!("Pergunta {} de {}", question.number(), question.total),
            text: question.text.clone(),
            options: question.options.clone(),
            answered: question.answered,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub heading: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub unanswered: bool,
}

impl ReviewRowVm {
    fn from_item(item: &ReviewItem) -> Self {
        let unanswered = item.is_unanswered();
        Self {
            heading: format!("Q{}: {}", item.index + 1, item.question_text),
            user_answer: if unanswered {
                UNANSWERED_LABEL.to_string()
            } else {
                item.user_answer.clone()
            },
            correct_answer: item.correct_answer.clone(),
            unanswered,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_line: String,
    pub expired: bool,
    pub review: Vec<ReviewRowVm>,
}

impl ResultVm {
    fn from_result(result: &QuizResult) -> Self {
        Self {
            score_line: result.score_line(),
            expired: result.reason() == SubmissionReason::TimeExpired,
            review: result.review().iter().map(ReviewRowVm::from_item).collect(),
        }
    }
}

/// Display-ready copy of a `QuizView`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub screen: Screen,
    pub timer_label: String,
    pub timer_running: bool,
    pub progress_style: String,
    pub question: Option<QuestionVm>,
    pub error_message: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_last: bool,
    pub result: Option<ResultVm>,
}

impl QuizVm {
    #[must_use]
    pub fn from_view(view: &QuizView) -> Self {
        Self {
            screen: view.screen,
            timer_label: format_time_remaining(view.time_remaining),
            timer_running: view.timer_running,
            progress_style: progress_style(view.progress_percent),
            question: view.question.as_ref().map(QuestionVm::from_view),
            error_message: view.error_message.clone(),
            can_go_back: view.can_go_back,
            can_go_forward: view.can_go_forward,
            is_last: view.is_last,
            result: view.result.as_ref().map(ResultVm::from_result),
        }
    }
}

fn map_quiz_error(err: &QuizError) -> ViewError {
    warn!(error = %err, "quiz command failed");
    match err {
        QuizError::InvalidOption { .. } => ViewError::InvalidOption,
        QuizError::Progress(_) => ViewError::Storage,
        _ => ViewError::Unknown,
    }
}

/// Initial view model, resuming saved progress first when `resume` is set.
///
/// # Errors
///
/// Returns `ViewError::Storage` when saved progress cannot be read.
pub async fn load_quiz(quiz: &Mutex<QuizController>, resume: bool) -> Result<QuizVm, ViewError> {
    let mut quiz = quiz.lock().await;
    if resume {
        quiz.boot().await.map_err(|err| map_quiz_error(&err))?;
    }
    Ok(QuizVm::from_view(&quiz.view()))
}

/// Initial view model for the screen, resuming saved progress until one
/// load has succeeded.
///
/// # Errors
///
/// Returns `ViewError::Storage` when saved progress cannot be read. The
/// resume stays pending so a retry tries again.
pub async fn load_from_context(ctx: &AppContext) -> Result<QuizVm, ViewError> {
    let quiz = ctx.quiz();
    let vm = load_quiz(&quiz, ctx.resume_pending()).await?;
    ctx.mark_resumed();
    Ok(vm)
}

/// Advance the countdown once the initial load is done.
///
/// Before that nothing is dispatched, so an early tick cannot replace the
/// resumed view. Failed ticks are dropped.
pub async fn tick_after_load(quiz: &Mutex<QuizController>, loaded: bool) -> Option<QuizVm> {
    if !loaded {
        return None;
    }
    dispatch_command(quiz, QuizCommand::Tick).await.ok()
}

/// Run one command under the lock and return the refreshed view model.
///
/// # Errors
///
/// Returns `ViewError::InvalidOption` for an option past the end, or
/// `ViewError::Storage` when progress cannot be saved or cleared.
pub async fn dispatch_command(
    quiz: &Mutex<QuizController>,
    command: QuizCommand,
) -> Result<QuizVm, ViewError> {
    let mut quiz = quiz.lock().await;
    quiz.dispatch(command)
        .await
        .map_err(|err| map_quiz_error(&err))?;
    Ok(QuizVm::from_view(&quiz.view()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use quiz_core::model::{QuestionBank, QuizSettings, SessionState};
    use services::{ProgressService, RecordingNotifier};
    use storage::repository::{InMemoryStore, KeyValueStore, StorageError};

    use super::*;
    use crate::context::{UiApp, build_app_context};

    fn controller() -> Mutex<QuizController> {
        let bank = QuestionBank::from_rows([
            ("Q1", ["a", "b", "c", "d"], "a"),
            ("Q2", ["a", "b", "c", "d"], "b"),
        ])
        .unwrap();
        Mutex::new(QuizController::new(
            Arc::new(bank),
            QuizSettings::default(),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        ))
    }

    #[tokio::test]
    async fn start_then_select_builds_question_vm() {
        let quiz = controller();
        let vm = load_quiz(&quiz, true).await.unwrap();
        assert_eq!(vm.screen, Screen::Start);
        assert!(vm.question.is_none());

        dispatch_command(&quiz, QuizCommand::Start).await.unwrap();
        let vm = dispatch_command(&quiz, QuizCommand::Select(1)).await.unwrap();
        let question = vm.question.unwrap();
        assert_eq!(question.heading, "Pergunta 1 de 2");
        assert!(question.answered);
        assert_eq!(vm.timer_label, "Tempo restante: 60s");
        assert_eq!(vm.progress_style, "width: 0%");
        assert!(vm.can_go_forward);
    }

    #[tokio::test]
    async fn review_rows_label_blank_answers() {
        let quiz = controller();
        dispatch_command(&quiz, QuizCommand::Start).await.unwrap();
        dispatch_command(&quiz, QuizCommand::Select(3)).await.unwrap();
        for _ in 0..60 {
            dispatch_command(&quiz, QuizCommand::Tick).await.unwrap();
        }
        let vm = dispatch_command(&quiz, QuizCommand::Tick).await.unwrap();

        let result = vm.result.unwrap();
        assert!(result.expired);
        assert_eq!(result.score_line, "Você acertou 0 de 2 perguntas!");
        assert_eq!(result.review.len(), 2);
        assert_eq!(result.review[0].heading, "Q1: Q1");
        assert_eq!(result.review[0].user_answer, "d");
        assert!(result.review[1].unanswered);
        assert_eq!(result.review[1].user_answer, UNANSWERED_LABEL);
    }

    #[tokio::test]
    async fn invalid_option_maps_to_view_error() {
        let quiz = controller();
        dispatch_command(&quiz, QuizCommand::Start).await.unwrap();
        let err = dispatch_command(&quiz, QuizCommand::Select(9)).await.unwrap_err();
        assert_eq!(err, ViewError::InvalidOption);
    }

    /// Fails the first `failures` reads, then behaves like the inner store.
    #[derive(Clone)]
    struct FlakyReadStore {
        inner: InMemoryStore,
        failures: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl KeyValueStore for FlakyReadStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let failing = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(StorageError::Connection("offline".to_string()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    struct TestApp {
        quiz: Arc<Mutex<QuizController>>,
    }

    impl UiApp for TestApp {
        fn quiz(&self) -> Arc<Mutex<QuizController>> {
            Arc::clone(&self.quiz)
        }

        fn notifications(&self) -> RecordingNotifier {
            RecordingNotifier::new()
        }

        fn resume_on_launch(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn retry_after_read_failure_still_resumes() {
        let inner = InMemoryStore::new();
        let mut saved = SessionState::new(2, 60);
        saved.record_answer("a");
        saved.advance();
        saved.set_time_remaining(20);
        ProgressService::new(Arc::new(inner.clone()), "quizState")
            .save_progress(&saved)
            .await
            .unwrap();

        let store = FlakyReadStore {
            inner,
            failures: Arc::new(AtomicUsize::new(1)),
        };
        let bank = QuestionBank::from_rows([
            ("Q1", ["a", "b", "c", "d"], "a"),
            ("Q2", ["a", "b", "c", "d"], "b"),
        ])
        .unwrap();
        let quiz = Arc::new(Mutex::new(QuizController::new(
            Arc::new(bank),
            QuizSettings::default(),
            Arc::new(store),
            Arc::new(RecordingNotifier::new()),
        )));
        let app: Arc<dyn UiApp> = Arc::new(TestApp { quiz });
        let ctx = build_app_context(&app);

        assert_eq!(load_from_context(&ctx).await.unwrap_err(), ViewError::Storage);
        assert!(ctx.resume_pending());

        let vm = load_from_context(&ctx).await.unwrap();
        assert_eq!(vm.screen, Screen::Quiz);
        assert_eq!(vm.question.unwrap().heading, "Pergunta 2 de 2");
        assert_eq!(vm.timer_label, "Tempo restante: 20s");
        assert!(!ctx.resume_pending());
    }

    #[tokio::test]
    async fn ticks_wait_for_initial_load() {
        let quiz = controller();
        dispatch_command(&quiz, QuizCommand::Start).await.unwrap();

        assert_eq!(tick_after_load(&quiz, false).await, None);
        assert_eq!(quiz.lock().await.state().time_remaining(), 60);

        let vm = tick_after_load(&quiz, true).await.unwrap();
        assert_eq!(vm.timer_label, "Tempo restante: 59s");
    }
}
