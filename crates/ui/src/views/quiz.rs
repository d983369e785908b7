use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::{Direction, LessonId};
use services::QuizSnapshot;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{OptionVm, QuestionVm, QuizScreenVm, map_quiz_snapshot};

#[component]
pub fn QuizView(lesson: String, reverse: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut snapshot = use_signal(QuizSnapshot::default);

    let runner = ctx.runner();
    use_future(move || {
        let runner = runner.clone();
        async move {
            let mut updates = runner.subscribe();
            loop {
                let current = updates.borrow_and_update().clone();
                snapshot.set(current);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let runner = ctx.runner();
    use_resource(use_reactive!(|(lesson, reverse)| {
        let runner = runner.clone();
        async move {
            match LessonId::new(lesson) {
                // Failures are published to the snapshot as `Unavailable`.
                Ok(id) => {
                    let _ = runner.start(id, Direction::from_reverse(reverse)).await;
                }
                Err(_) => {
                    navigator.replace(Route::Lessons {});
                }
            }
        }
    }));

    let runner = ctx.runner();
    use_drop(move || runner.leave());

    use_effect(move || {
        if matches!(*snapshot.read(), QuizSnapshot::Ended(_)) {
            navigator.replace(Route::Lessons {});
        }
    });

    let screen = map_quiz_snapshot(&snapshot.read());
    let runner = ctx.runner();

    rsx! {
        div { class: "page quiz-container",
            button {
                class: "back-button",
                onclick: move |_| {
                    navigator.push(Route::Lessons {});
                },
                "Back to lessons"
            }

            match screen {
                QuizScreenVm::Loading => rsx! {
                    p { "Loading..." }
                },
                QuizScreenVm::Message { title, detail } => rsx! {
                    h2 { "{title}" }
                    p { "{detail}" }
                },
                QuizScreenVm::Question(vm) => rsx! {
                    QuestionPanel {
                        vm,
                        // Clicks while feedback is showing are rejected by the runner.
                        on_answer: move |choice: String| {
                            let _ = runner.answer(&choice);
                        },
                    }
                },
                QuizScreenVm::Ended { summary, passed } => rsx! {
                    h2 {
                        if passed { "Lesson complete!" } else { "Quiz over" }
                    }
                    p { "{summary}" }
                },
            }
        }
    }
}

#[component]
pub fn QuestionPanel(vm: QuestionVm, on_answer: EventHandler<String>) -> Element {
    rsx! {
        div { class: "question",
            h2 { class: "question-number", "{vm.heading}" }
            if let Some(timer) = vm.timer_label.clone() {
                p { class: "timer", "{timer}" }
            }
            p { class: "question-text", "{vm.prompt}" }
            div { class: "options-container",
                for option in vm.options.clone() {
                    OptionButton { key: "{option.label}", option, on_answer }
                }
            }
            if let Some(feedback) = vm.feedback {
                p { class: feedback.class(), "{feedback.message()}" }
            }
            p { class: "score", "{vm.score_label}" }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_answer: EventHandler<String>) -> Element {
    let choice = option.label.clone();
    rsx! {
        button {
            class: option.class,
            disabled: option.disabled,
            onclick: move |_| on_answer.call(choice.clone()),
            "{option.label}"
        }
    }
}
