mod runner;
mod service;
mod settings;
mod snapshot;
mod timer;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use runner::QuizRunner;
pub use service::QuizService;
pub use settings::QuizSettings;
pub use snapshot::{QuestionSnapshot, QuizSnapshot, Unavailable};
