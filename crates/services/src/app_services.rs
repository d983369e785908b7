use std::path::PathBuf;
use std::sync::Arc;

use storage::lesson_file::LessonDocument;
use storage::repository::{LessonRepository, Storage};
use tokio::runtime::Handle;

use crate::error::AppServicesError;
use crate::history_service::ScoreHistoryService;
use crate::lesson_service::LessonService;
use crate::quiz::{QuizRunner, QuizService, QuizSettings};
use crate::remote_lessons::HttpLessonRepository;
use crate::Clock;

/// Where lessons are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonSource {
    /// A lesson document on disk, loaded once.
    File(PathBuf),
    /// A lesson server base url.
    Remote(String),
}

impl LessonSource {
    /// `http://` and `https://` values name a lesson server; anything else is a path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Remote(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

/// Where score history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStore {
    Memory,
    Sqlite(String),
}

impl HistoryStore {
    /// `memory` (or an in-memory `SQLite` url) keeps history in process;
    /// anything else is a `SQLite` url.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("memory") || value == "sqlite::memory:" {
            Self::Memory
        } else {
            Self::Sqlite(value.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub lessons: LessonSource,
    pub history: HistoryStore,
    pub quiz: QuizSettings,
    /// Fixed shuffle seed for reproducible quizzes.
    pub seed: Option<u64>,
}

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    lessons: Arc<LessonService>,
    history: Arc<ScoreHistoryService>,
    runner: QuizRunner,
}

impl AppServices {
    /// Build services from configuration. Must run inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the lesson source or the history store
    /// cannot be opened.
    pub async fn bootstrap(config: AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let lessons: Arc<dyn LessonRepository> = match &config.lessons {
            LessonSource::File(path) => Arc::new(LessonDocument::load(path)?.into_repository()),
            LessonSource::Remote(url) => {
                tracing::info!(url = %url, "using remote lesson server");
                Arc::new(HttpLessonRepository::new(url)?)
            }
        };
        let storage = match &config.history {
            HistoryStore::Memory => Storage::in_memory().with_lessons(lessons),
            HistoryStore::Sqlite(url) => Storage::sqlite(url, lessons).await?,
        };
        Ok(Self::from_storage(
            storage,
            clock,
            config.quiz,
            config.seed,
            Handle::current(),
        ))
    }

    /// Wire services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(
        storage: Storage,
        clock: Clock,
        settings: QuizSettings,
        seed: Option<u64>,
        runtime: Handle,
    ) -> Self {
        let lessons = LessonService::new(Arc::clone(&storage.lessons));
        let history = ScoreHistoryService::new(clock, Arc::clone(&storage.scores));
        let quiz = match seed {
            Some(seed) => QuizService::with_seed(lessons.clone(), seed),
            None => QuizService::new(lessons.clone()),
        };
        let runner = QuizRunner::new(quiz, history.clone(), settings, runtime);

        Self {
            lessons: Arc::new(lessons),
            history: Arc::new(history),
            runner,
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
