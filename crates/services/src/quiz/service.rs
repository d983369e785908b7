use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::model::{Direction, LessonId};
use quiz_core::{QuestionGenerator, QuizSession};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::QuizError;
use crate::lesson_service::LessonService;

/// Builds ready-to-run quiz sessions from lessons.
#[derive(Clone)]
pub struct QuizService {
    lessons: LessonService,
    generator: QuestionGenerator,
    rng: Arc<Mutex<StdRng>>,
}

impl QuizService {
    /// Quiz service with a randomly seeded shuffle.
    #[must_use]
    pub fn new(lessons: LessonService) -> Self {
        Self::with_seed(lessons, rand::random())
    }

    /// Quiz service whose question and option order is reproducible.
    #[must_use]
    pub fn with_seed(lessons: LessonService, seed: u64) -> Self {
        Self {
            lessons,
            generator: QuestionGenerator::new(),
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Fetch a lesson and generate a fresh session over it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Lesson` if the lesson cannot be fetched and
    /// `QuizError::Generate` if it is too small to quiz.
    pub async fn start(
        &self,
        lesson_id: &LessonId,
        direction: Direction,
    ) -> Result<QuizSession, QuizError> {
        let lesson = self.lessons.get_lesson(lesson_id).await?;
        let questions = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.generator
                .generate(lesson.pairs(), direction, &mut *rng)?
        };
        tracing::debug!(
            lesson = %lesson_id,
            direction = direction.as_str(),
            questions = questions.len(),
            "generated quiz"
        );
        Ok(QuizSession::new(lesson_id.clone(), direction, questions)?)
    }
}
