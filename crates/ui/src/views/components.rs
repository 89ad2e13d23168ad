use dioxus::prelude::*;
use services::{QuizCommand, Screen};

use crate::vm::{QuestionVm, QuizVm, ResultVm};

#[component]
pub fn ProgressBar(style: String) -> Element {
    rsx! {
        div { class: "progress-track",
            div { id: "progress-bar", class: "progress-fill", style: "{style}" }
        }
    }
}

#[component]
pub fn StartPanel(on_command: Callback<QuizCommand>) -> Element {
    rsx! {
        section { id: "start-screen", class: "panel start-panel",
            h2 { class: "view-title", "Quiz de JavaScript" }
            p { class: "view-subtitle", "Dez perguntas, um minuto. Boa sorte!" }
            button {
                id: "start-btn",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_command.call(QuizCommand::Start),
                "Iniciar quiz"
            }
        }
    }
}

#[component]
pub fn QuestionPanel(vm: QuizVm, on_command: Callback<QuizCommand>) -> Element {
    let Some(QuestionVm {
        heading,
        text,
        options,
        ..
    }) = vm.question.clone()
    else {
        return rsx! {};
    };

    rsx! {
        section { id: "quiz-screen", class: "panel quiz-panel",
            header { class: "quiz-header",
                span { class: "quiz-heading", "{heading}" }
                span {
                    id: "timer",
                    class: if vm.timer_running { "timer" } else { "timer timer--stopped" },
                    "{vm.timer_label}"
                }
            }
            ProgressBar { style: vm.progress_style.clone() }
            p { id: "question-container", class: "question-text", "{text}" }
            div { id: "options-container", class: "options",
                for option in options {
                    button {
                        key: "{option.index}",
                        class: if option.selected { "option-btn selected" } else { "option-btn" },
                        r#type: "button",
                        disabled: option.disabled,
                        onclick: move |_| on_command.call(QuizCommand::Select(option.index)),
                        "{option.text}"
                    }
                }
            }
            if let Some(message) = vm.error_message.as_ref() {
                p { id: "error-message", class: "error-message", "{message}" }
            }
            nav { class: "quiz-nav",
                button {
                    id: "prev-btn",
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_go_back,
                    onclick: move |_| on_command.call(QuizCommand::Prev),
                    "Anterior"
                }
                button {
                    id: "next-btn",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !vm.can_go_forward,
                    onclick: move |_| on_command.call(QuizCommand::Next),
                    if vm.is_last { "Finalizar" } else { "Próxima" }
                }
                button {
                    id: "submit-btn",
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_command.call(QuizCommand::Submit),
                    "Enviar"
                }
                button {
                    id: "quiz-reset-btn",
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_command.call(QuizCommand::Reset),
                    "Reiniciar"
                }
            }
        }
    }
}

#[component]
pub fn ResultPanel(result: ResultVm, on_command: Callback<QuizCommand>) -> Element {
    rsx! {
        section { id: "result-screen", class: "panel result-panel",
            h2 { class: "view-title", "Resultado" }
            if result.expired {
                p { class: "view-subtitle", "O tempo acabou." }
            }
            p { id: "score", class: "score", "{result.score_line}" }
            if !result.review.is_empty() {
                ul { id: "incorrect-list", class: "review-list",
                    for (idx, row) in result.review.iter().enumerate() {
                        li { key: "{idx}", class: "review-item",
                            strong { "{row.heading}" }
                            p {
                                "Sua resposta: "
                                span { class: "incorrect", "{row.user_answer}" }
                            }
                            p {
                                "Resposta correta: "
                                span { class: "correct-answer", "{row.correct_answer}" }
                            }
                        }
                    }
                }
            }
            button {
                id: "reset-btn",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_command.call(QuizCommand::Reset),
                "Reiniciar"
            }
        }
    }
}

/// Picks the panel for the current screen.
#[component]
pub(super) fn QuizBody(vm: QuizVm, on_command: Callback<QuizCommand>) -> Element {
    match (vm.screen, vm.result.clone()) {
        (Screen::Start, _) => rsx! { StartPanel { on_command } },
        (Screen::Quiz, _) => rsx! { QuestionPanel { vm, on_command } },
        (Screen::Result, Some(result)) => rsx! { ResultPanel { result, on_command } },
        (Screen::Result, None) => rsx! { StartPanel { on_command } },
    }
}
