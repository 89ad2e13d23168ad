use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{QuestionBank, QuizSettings};
use services::{QuizController, RecordingNotifier};
use storage::repository::{InMemoryStore, KeyValueStore};
use tokio::sync::Mutex;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizScreen;

#[derive(Clone)]
struct TestApp {
    quiz: Arc<Mutex<QuizController>>,
    notifications: RecordingNotifier,
}

impl UiApp for TestApp {
    fn quiz(&self) -> Arc<Mutex<QuizController>> {
        Arc::clone(&self.quiz)
    }

    fn notifications(&self) -> RecordingNotifier {
        self.notifications.clone()
    }

    fn resume_on_launch(&self) -> bool {
        true
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizScreen {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: InMemoryStore,
    pub quiz: Arc<Mutex<QuizController>>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness() -> ViewHarness {
    let store = InMemoryStore::new();
    build_harness(Arc::new(store.clone()), store)
}

/// Harness whose controller talks to `backend` instead of the in-memory store.
pub fn setup_view_harness_with_backend(backend: Arc<dyn KeyValueStore>) -> ViewHarness {
    build_harness(backend, InMemoryStore::new())
}

fn build_harness(backend: Arc<dyn KeyValueStore>, store: InMemoryStore) -> ViewHarness {
    let notifications = RecordingNotifier::new();
    let quiz = Arc::new(Mutex::new(QuizController::new(
        Arc::new(QuestionBank::javascript_basics()),
        QuizSettings::default(),
        backend,
        Arc::new(notifications.clone()),
    )));
    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
        notifications,
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app });

    ViewHarness { dom, store, quiz }
}
