use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::Direction;
use services::{LessonService, QuizRunner, ScoreHistoryService};

pub trait UiApp: Send + Sync {
    fn lessons(&self) -> Arc<LessonService>;
    fn history(&self) -> Arc<ScoreHistoryService>;
    fn runner(&self) -> QuizRunner;
}

#[derive(Clone)]
pub struct AppContext {
    lessons: Arc<LessonService>,
    history: Arc<ScoreHistoryService>,
    runner: QuizRunner,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lessons: app.lessons(),
            history: app.history(),
            runner: app.runner(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn history(&self) -> Arc<ScoreHistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn runner(&self) -> QuizRunner {
        self.runner.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Provide the quiz direction picked on the lessons page.
///
/// Lives above the router so the choice outlasts the page itself.
pub fn use_direction_provider() -> Signal<Direction> {
    use_context_provider(|| Signal::new(Direction::default()))
}

/// The shared quiz direction.
#[must_use]
pub fn use_direction() -> Signal<Direction> {
    use_context::<Signal<Direction>>()
}
