use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use quiz_core::model::{Direction, LessonId};
use quiz_core::{Advance, AnswerOutcome, QuizSession, SessionStatus};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{Instant, interval_at};

use super::service::QuizService;
use super::settings::{COUNTDOWN_TICK, QuizSettings};
use super::snapshot::{QuestionSnapshot, QuizSnapshot, Unavailable};
use super::timer::ScheduledTask;
use crate::error::QuizError;
use crate::history_service::ScoreHistoryService;

/// Drives one quiz at a time: answers, feedback delays, countdowns and
/// score recording.
///
/// Every start or leave bumps a generation counter. Scheduled callbacks carry
/// the generation they were armed for and do nothing once it has moved on.
/// Session transitions happen under a single lock that is never held across
/// an `.await`.
#[derive(Clone)]
pub struct QuizRunner {
    inner: Arc<Inner>,
}

struct Inner {
    quiz: QuizService,
    history: ScoreHistoryService,
    settings: QuizSettings,
    runtime: Handle,
    state: Mutex<RunnerState>,
    snapshots: watch::Sender<QuizSnapshot>,
}

#[derive(Default)]
struct RunnerState {
    generation: u64,
    live: Option<LiveQuiz>,
}

struct LiveQuiz {
    session: QuizSession,
    remaining_secs: Option<u64>,
    feedback: Option<ScheduledTask>,
    countdown: Option<ScheduledTask>,
}

impl QuizRunner {
    #[must_use]
    pub fn new(
        quiz: QuizService,
        history: ScoreHistoryService,
        settings: QuizSettings,
        runtime: Handle,
    ) -> Self {
        let (snapshots, _) = watch::channel(QuizSnapshot::Idle);
        Self {
            inner: Arc::new(Inner {
                quiz,
                history,
                settings,
                runtime,
                state: Mutex::new(RunnerState::default()),
                snapshots,
            }),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.snapshots.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.inner.settings
    }

    /// Start a quiz over a lesson, replacing any running quiz.
    ///
    /// A start superseded by another `start` or `leave` while the lesson was
    /// loading is dropped silently.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Lesson` or `QuizError::Generate` when the lesson
    /// cannot be quizzed; the snapshot then shows `Unavailable`.
    pub async fn start(&self, lesson_id: LessonId, direction: Direction) -> Result<(), QuizError> {
        let generation = {
            let mut state = self.inner.lock();
            state.generation += 1;
            state.live = None;
            self.inner.publish(QuizSnapshot::Loading {
                lesson_id: lesson_id.clone(),
                direction,
            });
            state.generation
        };

        let loaded = self.inner.quiz.start(&lesson_id, direction).await;

        let mut state = self.inner.lock();
        if state.generation != generation {
            tracing::debug!(lesson = %lesson_id, "dropping superseded quiz start");
            return Ok(());
        }
        match loaded {
            Ok(session) => {
                let mut live = LiveQuiz {
                    session,
                    remaining_secs: self.inner.settings.time_limit_secs(),
                    feedback: None,
                    countdown: None,
                };
                live.countdown = arm_countdown(&self.inner, generation);
                self.inner.publish_question(&live);
                tracing::info!(
                    lesson = %lesson_id,
                    direction = direction.as_str(),
                    questions = live.session.total(),
                    "quiz started"
                );
                state.live = Some(live);
                Ok(())
            }
            Err(err) => {
                let reason = Unavailable::from_error(&err);
                tracing::warn!(lesson = %lesson_id, error = %err, "quiz unavailable");
                self.inner
                    .publish(QuizSnapshot::Unavailable { lesson_id, reason });
                Err(err)
            }
        }
    }

    /// Answer the current question and schedule its feedback acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` when no quiz is loaded and
    /// `QuizError::Session` when the quiz is not waiting for an answer.
    pub fn answer(&self, choice: &str) -> Result<AnswerOutcome, QuizError> {
        let mut state = self.inner.lock();
        let generation = state.generation;
        let live = state.live.as_mut().ok_or(QuizError::NoActiveSession)?;
        let outcome = live.session.submit_answer(Some(choice))?;
        live.countdown = None;
        schedule_feedback(&self.inner, live, generation, outcome.is_correct());
        Ok(outcome)
    }

    /// Abandon the running quiz. Pending callbacks are cancelled and nothing
    /// is recorded.
    pub fn leave(&self) {
        let mut state = self.inner.lock();
        state.generation += 1;
        if state.live.take().is_some() {
            tracing::debug!("quiz left");
        }
        self.inner.publish(QuizSnapshot::Idle);
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, RunnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: QuizSnapshot) {
        self.snapshots.send_replace(snapshot);
    }

    fn publish_question(&self, live: &LiveQuiz) {
        self.publish(QuizSnapshot::Question(QuestionSnapshot::from_session(
            &live.session,
            live.remaining_secs,
        )));
    }
}

fn schedule_feedback(inner: &Arc<Inner>, live: &mut LiveQuiz, generation: u64, correct: bool) {
    let delay = inner.settings.feedback_delay(correct);
    live.feedback = Some(ScheduledTask::spawn(
        &inner.runtime,
        acknowledge_after(Arc::downgrade(inner), generation, delay),
    ));
    inner.publish_question(live);
}

fn arm_countdown(inner: &Arc<Inner>, generation: u64) -> Option<ScheduledTask> {
    inner.settings.time_limit_secs()?;
    Some(ScheduledTask::spawn(
        &inner.runtime,
        count_down(Arc::downgrade(inner), generation),
    ))
}

async fn acknowledge_after(inner: Weak<Inner>, generation: u64, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };

    let ended = {
        let mut state = inner.lock();
        if state.generation != generation {
            return;
        }
        let Some(live) = state.live.as_mut() else {
            return;
        };
        if let Some(task) = live.feedback.take() {
            task.detach();
        }
        match live.session.acknowledge() {
            Ok(Advance::Next { .. }) => {
                live.remaining_secs = inner.settings.time_limit_secs();
                live.countdown = arm_countdown(&inner, generation);
                inner.publish_question(live);
                None
            }
            Ok(Advance::Ended(result)) => Some(result),
            Err(err) => {
                tracing::warn!(error = %err, "feedback acknowledgement rejected");
                None
            }
        }
    };

    let Some(result) = ended else {
        return;
    };
    if let Err(err) = inner.history.record(&result).await {
        tracing::warn!(error = %err, lesson = %result.lesson_id(), "failed to record score");
    }
    let state = inner.lock();
    if state.generation == generation {
        inner.publish(QuizSnapshot::Ended(result));
    }
}

async fn count_down(inner: Weak<Inner>, generation: u64) {
    let mut ticks = interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
    loop {
        ticks.tick().await;
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut state = inner.lock();
        if state.generation != generation {
            return;
        }
        let Some(live) = state.live.as_mut() else {
            return;
        };
        if live.session.status() != SessionStatus::Active {
            return;
        }

        let remaining = live.remaining_secs.unwrap_or(0).saturating_sub(1);
        live.remaining_secs = Some(remaining);
        if remaining > 0 {
            inner.publish_question(live);
            continue;
        }

        if let Some(task) = live.countdown.take() {
            task.detach();
        }
        match live.session.expire() {
            Ok(_) => {
                tracing::debug!(question = live.session.current_index(), "question timed out");
                schedule_feedback(&inner, live, generation, false);
            }
            Err(err) => tracing::warn!(error = %err, "countdown expiry rejected"),
        }
        return;
    }
}
