use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::{QuizController, RecordingNotifier};
use tokio::sync::Mutex;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn quiz(&self) -> Arc<Mutex<QuizController>>;
    fn notifications(&self) -> RecordingNotifier;

    /// Whether the first render should try to resume saved progress.
    fn resume_on_launch(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<Mutex<QuizController>>,
    notifications: RecordingNotifier,
    resume_pending: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz(),
            notifications: app.notifications(),
            resume_pending: Arc::new(AtomicBool::new(app.resume_on_launch())),
        }
    }

    /// Shared controller. Lock it for exactly one command at a time.
    #[must_use]
    pub fn quiz(&self) -> Arc<Mutex<QuizController>> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn notifications(&self) -> RecordingNotifier {
        self.notifications.clone()
    }

    /// True until a resume attempt has completed.
    #[must_use]
    pub fn resume_pending(&self) -> bool {
        self.resume_pending.load(Ordering::Acquire)
    }

    /// Record that saved progress has been loaded, so later loads skip it.
    pub fn mark_resumed(&self) {
        self.resume_pending.store(false, Ordering::Release);
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
