use quiz_core::QuizResult;
use quiz_core::model::{QuestionBank, SessionState};

use super::controller::Screen;

/// One option button on the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
}

/// The question at the current index, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionView>,
    pub answered: bool,
}

impl QuestionView {
    /// Project `state.current_index()` out of the bank.
    ///
    /// Once answered, every option is disabled and the recorded one is selected.
    #[must_use]
    pub fn current(bank: &QuestionBank, state: &SessionState) -> Option<Self> {
        let index = state.current_index();
        let question = bank.get(index)?;
        let recorded = state.answer(index);
        let answered = recorded.is_some();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(option_index, text)| OptionView {
                index: option_index,
                text: text.clone(),
                selected: recorded == Some(text.as_str()),
                disabled: answered,
            })
            .collect();

        Some(Self {
            index,
            total: bank.len(),
            text: question.text().to_string(),
            options,
            answered,
        })
    }

    /// One-based position, for display.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Presentation-agnostic snapshot of everything the screens show.
///
/// No pre-formatted strings beyond the messages the controller owns; the UI
/// decides how to label the timer and progress.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub screen: Screen,
    pub question: Option<QuestionView>,
    pub progress_percent: f32,
    pub time_remaining: u32,
    pub timer_running: bool,
    pub error_message: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_last: bool,
    pub result: Option<QuizResult>,
}
