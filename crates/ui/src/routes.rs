use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HistoryView, LessonsView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LessonsView)] Lessons {},
        #[route("/quiz/:lesson/:reverse", QuizView)] Quiz { lesson: String, reverse: bool },
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Vocabulary" }
            ul {
                li { Link { to: Route::Lessons {}, "Lessons" } }
                li { Link { to: Route::History {}, "History" } }
            }
        }
    }
}
