use std::time::Duration;

/// Delay before a correct answer moves on.
pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(1000);
/// Delay before a wrong answer ends the run.
pub const WRONG_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);
/// Countdown resolution.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Timing knobs for the quiz runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub correct_delay: Duration,
    pub wrong_delay: Duration,
    /// Per-question time limit. `None` disables the countdown.
    pub time_limit: Option<Duration>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            correct_delay: CORRECT_FEEDBACK_DELAY,
            wrong_delay: WRONG_FEEDBACK_DELAY,
            time_limit: None,
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Whole countdown seconds per question; sub-second limits round up to one.
    #[must_use]
    pub fn time_limit_secs(&self) -> Option<u64> {
        self.time_limit.map(|limit| limit.as_secs().max(1))
    }

    #[must_use]
    pub(crate) fn feedback_delay(&self, correct: bool) -> Duration {
        if correct {
            self.correct_delay
        } else {
            self.wrong_delay
        }
    }
}
