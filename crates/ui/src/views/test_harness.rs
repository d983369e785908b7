use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Direction, Lesson, LessonId, WordList, WordPair};
use quiz_core::time::fixed_clock;
use services::{AppServices, LessonService, QuizRunner, QuizSettings, ScoreHistoryService};
use storage::repository::Storage;
use tokio::runtime::Handle;

use crate::context::{UiApp, build_app_context, use_direction_provider};
use crate::views::{HistoryView, LessonsView, QuizView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn history(&self) -> Arc<ScoreHistoryService> {
        self.services.history()
    }

    fn runner(&self) -> QuizRunner {
        self.services.runner()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Lessons,
    History,
    Quiz { lesson: &'static str, reverse: bool },
}

#[derive(Clone, Default)]
struct HarnessHandles {
    view: Rc<RefCell<Option<Signal<ViewKind>>>>,
    direction: Rc<RefCell<Option<Signal<Direction>>>>,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_context_provider(|| Signal::new(props.view));
    let direction = use_direction_provider();
    *props.handles.view.borrow_mut() = Some(view);
    *props.handles.direction.borrow_mut() = Some(direction);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Lessons => rsx! { LessonsView {} },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::Quiz { lesson, reverse } => rsx! {
            QuizView { lesson: lesson.to_string(), reverse }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    handles: HarnessHandles,
}

impl ViewHarness {
    /// Swap the rendered view, unmounting the current one.
    pub fn show(&mut self, view: ViewKind) {
        let mut signal = (*self.handles.view.borrow()).expect("view signal registered");
        self.dom.in_runtime(|| signal.set(view));
    }

    pub fn set_direction(&mut self, direction: Direction) {
        let mut signal = (*self.handles.direction.borrow()).expect("direction signal registered");
        self.dom.in_runtime(|| signal.set(direction));
    }

    pub fn direction(&self) -> Direction {
        let signal = (*self.handles.direction.borrow()).expect("direction signal registered");
        self.dom.in_runtime(|| *signal.peek())
    }

    /// Let spawned tasks (lesson loads, runner subscriptions) settle.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

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

pub fn lesson(id: &str, words: &[(&str, &str)]) -> Lesson {
    let words: WordList = words
        .iter()
        .map(|(term, translation)| WordPair::new(*term, *translation).expect("word pair"))
        .collect();
    Lesson::new(LessonId::new(id).expect("lesson id"), words)
}

pub fn setup_view_harness(view: ViewKind, lessons: Vec<Lesson>) -> ViewHarness {
    let storage = Storage::in_memory_with_lessons(lessons);
    let services = AppServices::from_storage(
        storage,
        fixed_clock(),
        QuizSettings::default(),
        Some(1),
        Handle::current(),
    );
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        services,
        handles,
    }
}
