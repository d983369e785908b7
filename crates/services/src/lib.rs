#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod history_service;
pub mod lesson_service;
pub mod quiz;
pub mod remote_lessons;

pub use quiz_core::Clock;

pub use app_services::{AppConfig, AppServices, HistoryStore, LessonSource};
pub use error::{AppServicesError, HistoryError, LessonServiceError, QuizError, RemoteLessonsError};
pub use history_service::ScoreHistoryService;
pub use lesson_service::LessonService;
pub use quiz::{QuestionSnapshot, QuizRunner, QuizService, QuizSettings, QuizSnapshot, Unavailable};
pub use remote_lessons::HttpLessonRepository;
