use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ScoreRowVm, map_score_rows};

const HISTORY_LIMIT: u32 = 50;

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let resource = use_resource(move || {
        let history = history.clone();
        async move {
            let rows = history
                .recent(HISTORY_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_score_rows(&rows))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No quizzes yet." }
                    } else {
                        table { class: "history",
                            thead {
                                tr {
                                    th { "When" }
                                    th { "Lesson" }
                                    th { "Mode" }
                                    th { "Result" }
                                    th { "Correct" }
                                    th { "Score" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    ScoreRowItem { key: "{row.id}", row }
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

#[component]
fn ScoreRowItem(row: ScoreRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.recorded_at_str}" }
            td { "{row.lesson}" }
            td { "{row.direction}" }
            td { "{row.outcome}" }
            td { "{row.progress}" }
            td { "{row.score}" }
        }
    }
}
