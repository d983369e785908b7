use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::{Direction, OPTION_COUNT, QuestionError, QuestionItem, WordPair};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    /// The lesson does not hold enough distinct answers to fill every option slot.
    #[error("lesson has {available} distinct answers, at least {required} are needed")]
    InsufficientPairs { available: usize, required: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Turns a lesson's word pairs into a shuffled multiple-choice quiz.
///
/// Every pair produces exactly one question. Question order and option order
/// come from a uniform shuffle of the provided RNG. Distractors are drawn from
/// the answer side of the other pairs, skipping pairs that share the prompt
/// (their answers are just as correct); a lesson that cannot supply three
/// distinct distractors for every question is rejected up front.
///
/// # Examples
///
/// ```
/// # use quiz_core::generator::QuestionGenerator;
/// # use quiz_core::model::{Direction, WordPair};
/// use rand::SeedableRng;
///
/// let pairs = [
///     WordPair::new("犬", "dog").unwrap(),
///     WordPair::new("猫", "cat").unwrap(),
///     WordPair::new("水", "water").unwrap(),
///     WordPair::new("火", "fire").unwrap(),
/// ];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let questions = QuestionGenerator::new().generate(&pairs, Direction::Forward, &mut rng)?;
///
/// assert_eq!(questions.len(), 4);
/// assert!(questions.iter().all(|q| q.options().len() == 4));
/// # Ok::<(), quiz_core::generator::GenerateError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionGenerator {
    _private: (),
}

impl QuestionGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Distinct answer-side values a lesson offers in the given direction.
    #[must_use]
    pub fn distinct_answers(pairs: &[WordPair], direction: Direction) -> Vec<&str> {
        let mut answers: Vec<&str> = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let answer = direction.answer_of(pair);
            if !answers.contains(&answer) {
                answers.push(answer);
            }
        }
        answers
    }

    /// Build one question per pair.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::InsufficientPairs` when fewer than
    /// [`OPTION_COUNT`] distinct answers exist (an empty lesson included), or
    /// when some question is left with fewer than [`OPTION_COUNT`] candidates
    /// once answers sharing its prompt are set aside.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        pairs: &[WordPair],
        direction: Direction,
        rng: &mut R,
    ) -> Result<Vec<QuestionItem>, GenerateError> {
        let answers = Self::distinct_answers(pairs, direction);
        if answers.len() < OPTION_COUNT {
            return Err(GenerateError::InsufficientPairs {
                available: answers.len(),
                required: OPTION_COUNT,
            });
        }

        let mut order = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let pool = distractor_pool(pairs, pair, direction);
            if pool.len() < OPTION_COUNT - 1 {
                return Err(GenerateError::InsufficientPairs {
                    available: pool.len() + 1,
                    required: OPTION_COUNT,
                });
            }
            order.push((pair, pool));
        }
        order.shuffle(rng);

        order
            .into_iter()
            .map(|(pair, pool)| build_question(pair, direction, pool, &mut *rng))
            .collect()
    }
}

/// Distinct wrong answers for `pair`, in lesson order.
fn distractor_pool<'a>(
    pairs: &'a [WordPair],
    pair: &WordPair,
    direction: Direction,
) -> Vec<&'a str> {
    let prompt = direction.prompt_of(pair);
    let correct = direction.answer_of(pair);
    let mut pool: Vec<&str> = Vec::with_capacity(pairs.len());
    for other in pairs {
        let answer = direction.answer_of(other);
        if direction.prompt_of(other) == prompt || answer == correct || pool.contains(&answer) {
            continue;
        }
        pool.push(answer);
    }
    pool
}

fn build_question<R: Rng + ?Sized>(
    pair: &WordPair,
    direction: Direction,
    mut distractors: Vec<&str>,
    rng: &mut R,
) -> Result<QuestionItem, GenerateError> {
    let correct = direction.answer_of(pair);

    distractors.shuffle(rng);
    distractors.truncate(OPTION_COUNT - 1);

    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_owned());
    options.extend(distractors.into_iter().map(str::to_owned));
    options.shuffle(rng);

    Ok(QuestionItem::new(direction.prompt_of(pair), correct, options)?)
}
