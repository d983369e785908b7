use std::collections::HashMap;
use std::time::Duration;

use quiz_core::model::{Direction, Lesson, LessonId, SessionEnd, WordList, WordPair};
use quiz_core::time::fixed_clock;
use quiz_core::SessionStatus;
use services::{
    AppServices, QuestionSnapshot, QuizError, QuizRunner, QuizSettings, QuizSnapshot, Unavailable,
};
use storage::repository::Storage;
use tokio::runtime::Handle;
use tokio::sync::watch;

const WORDS: [(&str, &str); 5] = [
    ("犬", "dog"),
    ("猫", "cat"),
    ("水", "water"),
    ("火", "fire"),
    ("山", "mountain"),
];

fn lesson(id: &str, words: &[(&str, &str)]) -> Lesson {
    let words: WordList = words
        .iter()
        .map(|(term, translation)| WordPair::new(*term, *translation).unwrap())
        .collect();
    Lesson::new(LessonId::new(id).unwrap(), words)
}

fn services(settings: QuizSettings) -> AppServices {
    let storage = Storage::in_memory_with_lessons(vec![
        lesson("1", &WORDS),
        lesson("tiny", &WORDS[..2]),
    ]);
    AppServices::from_storage(storage, fixed_clock(), settings, Some(7), Handle::current())
}

fn answer_for(prompt: &str) -> &'static str {
    let answers: HashMap<&str, &str> = WORDS.into_iter().collect();
    answers[prompt]
}

fn wrong_for(question: &QuestionSnapshot) -> String {
    let correct = answer_for(&question.prompt);
    question
        .options
        .iter()
        .find(|option| option.as_str() != correct)
        .cloned()
        .unwrap()
}

async fn active_question(rx: &mut watch::Receiver<QuizSnapshot>, index: usize) -> QuestionSnapshot {
    rx.wait_for(|s| {
        s.question()
            .is_some_and(|q| q.index == index && q.status == SessionStatus::Active)
    })
    .await
    .unwrap()
    .question()
    .cloned()
    .unwrap()
}

async fn ended(rx: &mut watch::Receiver<QuizSnapshot>) -> QuizSnapshot {
    rx.wait_for(|s| matches!(s, QuizSnapshot::Ended(_)))
        .await
        .unwrap()
        .clone()
}

fn lesson_one() -> LessonId {
    LessonId::new("1").unwrap()
}

#[tokio::test(start_paused = true)]
async fn perfect_run_finishes_and_records_history() {
    let services = services(QuizSettings::default());
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    for index in 0..WORDS.len() {
        let question = active_question(&mut rx, index).await;
        assert_eq!(question.total, 5);
        assert_eq!(question.score, 10 * index as u32);
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_answer.is_none());

        let outcome = runner.answer(answer_for(&question.prompt)).unwrap();
        assert!(outcome.is_correct());
        let feedback = runner.snapshot();
        let feedback = feedback.question().unwrap();
        assert_eq!(feedback.status, SessionStatus::AnsweredCorrect);
        assert_eq!(feedback.correct_answer.as_deref(), Some(answer_for(&question.prompt)));
    }

    let QuizSnapshot::Ended(result) = ended(&mut rx).await else {
        unreachable!()
    };
    assert_eq!(result.end(), SessionEnd::Finished);
    assert_eq!(result.score(), 50);

    let history = services.history().recent(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].record.score(), 50);
}

#[tokio::test(start_paused = true)]
async fn wrong_answer_ends_the_run_keeping_the_score() {
    let services = services(QuizSettings::default());
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let first = active_question(&mut rx, 0).await;
    runner.answer(answer_for(&first.prompt)).unwrap();

    let second = active_question(&mut rx, 1).await;
    let started = tokio::time::Instant::now();
    let outcome = runner.answer(&wrong_for(&second)).unwrap();
    assert!(!outcome.is_correct());

    let QuizSnapshot::Ended(result) = ended(&mut rx).await else {
        unreachable!()
    };
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(result.end(), SessionEnd::Failed);
    assert_eq!(result.score(), 10);
    assert_eq!(result.correct(), 1);

    let best = services
        .history()
        .best_for_lesson(&lesson_one())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.record.score(), 10);

    assert!(matches!(
        runner.answer("dog"),
        Err(QuizError::Session(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn reverse_quiz_prompts_with_translations() {
    let services = services(QuizSettings::default());
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Reverse).await.unwrap();
    let question = active_question(&mut rx, 0).await;
    assert_eq!(question.direction, Direction::Reverse);
    assert!(WORDS.iter().any(|(_, english)| *english == question.prompt));
    assert!(question
        .options
        .iter()
        .all(|option| WORDS.iter().any(|(term, _)| term == option)));
}

#[tokio::test(start_paused = true)]
async fn leaving_cancels_pending_feedback() {
    let services = services(QuizSettings::default());
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let question = active_question(&mut rx, 0).await;
    runner.answer(&wrong_for(&question)).unwrap();
    runner.leave();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(runner.snapshot(), QuizSnapshot::Idle);
    assert!(services.history().recent(10).await.unwrap().is_empty());
    assert!(matches!(runner.answer("dog"), Err(QuizError::NoActiveSession)));
}

#[tokio::test(start_paused = true)]
async fn restarting_discards_the_previous_run() {
    let services = services(QuizSettings::default());
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let question = active_question(&mut rx, 0).await;
    runner.answer(&wrong_for(&question)).unwrap();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let snapshot = runner.snapshot();
    let question = snapshot.question().unwrap();
    assert_eq!(question.index, 0);
    assert_eq!(question.status, SessionStatus::Active);
    assert_eq!(question.score, 0);
    assert!(services.history().recent(10).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn countdown_expiry_counts_as_a_wrong_answer() {
    let settings = QuizSettings::default().with_time_limit(Some(Duration::from_secs(3)));
    let services = services(settings);
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let question = active_question(&mut rx, 0).await;
    assert_eq!(question.remaining_secs, Some(3));

    let ticked = rx
        .wait_for(|s| s.question().is_some_and(|q| q.remaining_secs == Some(1)))
        .await
        .unwrap()
        .clone();
    assert_eq!(ticked.question().unwrap().status, SessionStatus::Active);

    let timed_out = rx
        .wait_for(|s| s.question().is_some_and(QuestionSnapshot::timed_out))
        .await
        .unwrap()
        .clone();
    assert_eq!(
        timed_out.question().unwrap().correct_answer.as_deref(),
        Some(answer_for(&question.prompt))
    );

    let QuizSnapshot::Ended(result) = ended(&mut rx).await else {
        unreachable!()
    };
    assert_eq!(result.end(), SessionEnd::Failed);
    assert_eq!(result.score(), 0);
}

#[tokio::test(start_paused = true)]
async fn answering_resets_the_countdown_for_the_next_question() {
    let settings = QuizSettings::default().with_time_limit(Some(Duration::from_secs(2)));
    let services = services(settings);
    let runner = services.runner();
    let mut rx = runner.subscribe();

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let first = active_question(&mut rx, 0).await;
    runner.answer(answer_for(&first.prompt)).unwrap();

    let second = active_question(&mut rx, 1).await;
    assert_eq!(second.remaining_secs, Some(2));
    assert_eq!(second.score, 10);
}

#[tokio::test(start_paused = true)]
async fn unknown_and_tiny_lessons_are_unavailable() {
    let services = services(QuizSettings::default());
    let runner = services.runner();

    let missing = LessonId::new("missing").unwrap();
    let err = runner
        .start(missing.clone(), Direction::Forward)
        .await
        .unwrap_err();
    assert!(matches!(err, QuizError::Lesson(_)));
    assert_eq!(
        runner.snapshot(),
        QuizSnapshot::Unavailable {
            lesson_id: missing,
            reason: Unavailable::NotFound,
        }
    );

    let tiny = LessonId::new("tiny").unwrap();
    runner
        .start(tiny.clone(), Direction::Forward)
        .await
        .unwrap_err();
    assert_eq!(
        runner.snapshot(),
        QuizSnapshot::Unavailable {
            lesson_id: tiny,
            reason: Unavailable::NoQuestions { available: 2 },
        }
    );
}

#[tokio::test(start_paused = true)]
async fn answers_are_rejected_while_feedback_is_showing() {
    let services = services(QuizSettings::default());
    let runner: QuizRunner = services.runner();
    let mut rx = runner.subscribe();

    assert!(matches!(runner.answer("dog"), Err(QuizError::NoActiveSession)));

    runner.start(lesson_one(), Direction::Forward).await.unwrap();
    let question = active_question(&mut rx, 0).await;
    runner.answer(answer_for(&question.prompt)).unwrap();
    assert!(matches!(
        runner.answer(answer_for(&question.prompt)),
        Err(QuizError::Session(_))
    ));
}
