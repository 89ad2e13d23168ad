use std::sync::Arc;

use quiz_core::model::SessionState;
use services::{ProgressService, QuizCommand};
use storage::repository::{KeyValueStore, StorageError};

use super::test_harness::{setup_view_harness, setup_view_harness_with_backend};

#[tokio::test(flavor = "current_thread")]
async fn start_screen_renders_start_button() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Iniciar quiz"), "missing start button in {html}");
    assert!(!html.contains("Tempo restante"), "timer shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn saved_progress_resumes_on_launch() {
    let mut harness = setup_view_harness();
    let progress = ProgressService::new(Arc::new(harness.store.clone()), "quizState");
    let mut saved = SessionState::new(10, 60);
    for answer in ["var", "2", "push", "=="] {
        saved.record_answer(answer);
        saved.advance();
    }
    saved.set_time_remaining(37);
    progress.save_progress(&saved).await.expect("save progress");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Pergunta 5 de 10"), "missing heading in {html}");
    assert!(html.contains("Tempo restante: 37s"), "missing timer in {html}");
    assert!(html.contains("width: 40%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_screen_renders_question_and_options() {
    let mut harness = setup_view_harness();
    {
        let mut quiz = harness.quiz.lock().await;
        quiz.dispatch(QuizCommand::Start).await.expect("start");
    }

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    let question = {
        let quiz = harness.quiz.lock().await;
        quiz.bank().get(0).expect("first question").clone()
    };
    assert!(html.contains("Pergunta 1 de 10"), "missing heading in {html}");
    assert!(html.contains(question.text()), "missing question in {html}");
    for option in question.options() {
        assert!(html.contains(option.as_str()), "missing option {option} in {html}");
    }
    assert!(html.contains("Tempo restante: 60s"), "missing timer in {html}");
    assert!(html.contains("quiz-reset-btn"), "missing reset button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_screen_renders_score_and_review() {
    let mut harness = setup_view_harness();
    {
        let mut quiz = harness.quiz.lock().await;
        quiz.dispatch(QuizCommand::Start).await.expect("start");
        for _ in 0..60 {
            quiz.dispatch(QuizCommand::Tick).await.expect("tick");
        }
    }

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Você acertou 0 de 10 perguntas!"),
        "missing score in {html}"
    );
    assert!(html.contains("Nenhuma resposta"), "missing blank answer in {html}");
    assert!(html.contains("Reiniciar"), "missing reset button in {html}");
}

struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn storage_failure_renders_error_state() {
    let mut harness = setup_view_harness_with_backend(Arc::new(FailingStore));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Não foi possível acessar o progresso salvo."),
        "missing error in {html}"
    );
    assert!(html.contains("Tentar novamente"), "missing retry in {html}");
}
