use std::time::Duration;

use dioxus::prelude::*;
use services::QuizCommand;

use super::components::QuizBody;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizVm, dispatch_command, load_from_context, tick_after_load};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[component]
pub fn QuizScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal(|| None::<QuizVm>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<String>);

    let ctx_for_load = ctx.clone();
    let resource = use_resource(move || {
        let ctx = ctx_for_load.clone();
        async move { load_from_context(&ctx).await }
    });

    let ctx_for_dispatch = ctx.clone();
    let on_command = use_callback(move |command: QuizCommand| {
        let quiz = ctx_for_dispatch.quiz();
        let notifications = ctx_for_dispatch.notifications();
        spawn(async move {
            let mut vm = vm;
            let mut error = error;
            let mut notice = notice;
            match dispatch_command(&quiz, command).await {
                Ok(next) => {
                    error.set(None);
                    vm.set(Some(next));
                }
                Err(err) => error.set(Some(err)),
            }
            if let Some(message) = notifications.take().pop() {
                notice.set(Some(message));
            }
        });
    });

    let ctx_for_ticker = ctx.clone();
    use_future(move || {
        let quiz = ctx_for_ticker.quiz();
        let notifications = ctx_for_ticker.notifications();
        async move {
            let mut vm = vm;
            let mut notice = notice;
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                // the resumed view must land before the countdown moves
                let loaded = matches!(resource.value().peek().as_ref(), Some(Ok(_)));
                let Some(next) = tick_after_load(&quiz, loaded).await else {
                    continue;
                };
                if vm.peek().as_ref() != Some(&next) {
                    vm.set(Some(next));
                }
                if let Some(message) = notifications.take().pop() {
                    notice.set(Some(message));
                }
            }
        }
    });

    let state = match vm() {
        Some(current) => ViewState::Ready(current),
        None => view_state_from_resource(resource),
    };

    rsx! {
        div { class: "page quiz-page",
            if let Some(message) = notice() {
                div { class: "notice", role: "alert",
                    p { "{message}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| notice.set(None),
                        "OK"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "view-error", "{err.message()}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Carregando..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Tentar novamente"
                    }
                },
                ViewState::Ready(current) => rsx! {
                    QuizBody { vm: current, on_command }
                },
            }
        }
    }
}
