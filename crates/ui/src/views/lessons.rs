use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, use_direction};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonItemVm, ScoreRowVm, direction_label, map_lesson_items, map_score_rows};

#[derive(Clone, Debug, PartialEq)]
struct LessonsData {
    lessons: Vec<LessonItemVm>,
    last: Option<ScoreRowVm>,
}

#[component]
pub fn LessonsView() -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let history = ctx.history();
    let mut direction = use_direction();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        let history = history.clone();
        async move {
            let ids = lessons
                .list_lessons()
                .await
                .map_err(|_| ViewError::Unavailable)?;
            let last = history.recent(1).await.map_err(|_| ViewError::Unknown)?;
            Ok(LessonsData {
                lessons: map_lesson_items(&ids),
                last: map_score_rows(&last).into_iter().next(),
            })
        }
    });

    let state = view_state_from_resource(&resource);
    let current = direction();

    rsx! {
        div { class: "page lesson-selection",
            h2 { "Lessons" }
            button {
                class: "mode-button",
                onclick: move |_| direction.set(current.toggled()),
                "Mode: {direction_label(current)}"
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(last) = data.last {
                        p { class: "last-score",
                            "Last quiz: lesson {last.lesson}, {last.score} points ({last.outcome})"
                        }
                    }
                    if data.lessons.is_empty() {
                        p { "No lessons yet." }
                    } else {
                        ul { class: "lesson-list",
                            for item in data.lessons {
                                li { key: "{item.id}",
                                    Link {
                                        class: "lesson-button",
                                        to: Route::Quiz {
                                            lesson: item.id.clone(),
                                            reverse: current.is_reverse(),
                                        },
                                        "{item.label}"
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
