use dioxus::prelude::*;
use quiz_core::SessionStatus;
use quiz_core::model::{Direction, LessonId, SessionEnd, SessionResult};
use services::{QuestionSnapshot, QuizSnapshot};

use super::QuestionPanel;
use super::test_harness::{ViewKind, lesson, setup_view_harness};
use crate::vm::QuestionVm;

const WORDS: [(&str, &str); 5] = [
    ("犬", "dog"),
    ("猫", "cat"),
    ("水", "water"),
    ("火", "fire"),
    ("山", "mountain"),
];

#[tokio::test(flavor = "current_thread")]
async fn lessons_view_smoke_renders_lessons_and_mode() {
    let mut harness = setup_view_harness(
        ViewKind::Lessons,
        vec![
            lesson("1", &[("犬", "dog"), ("猫", "cat")]),
            lesson("2", &[("水", "water")]),
        ],
    );

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1"), "missing lesson 1 in {html}");
    assert!(html.contains("Lesson 2"), "missing lesson 2 in {html}");
    assert!(html.contains("Mode: Term → translation"), "missing mode in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lessons_view_smoke_shows_last_score() {
    let mut harness = setup_view_harness(ViewKind::Lessons, vec![lesson("1", &[("犬", "dog")])]);
    let result = SessionResult::new(
        LessonId::new("1").unwrap(),
        Direction::Forward,
        SessionEnd::Failed,
        3,
        8,
    )
    .unwrap();
    harness.services.history().record(&result).await.unwrap();

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Last quiz: lesson 1, 30 points (Missed)"),
        "missing last score in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::History, Vec::new());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No quizzes yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_rows() {
    let mut harness = setup_view_harness(ViewKind::History, Vec::new());
    let result = SessionResult::new(
        LessonId::new("7").unwrap(),
        Direction::Reverse,
        SessionEnd::Finished,
        4,
        4,
    )
    .unwrap();
    harness.services.history().record(&result).await.unwrap();

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Finished"), "missing outcome in {html}");
    assert!(html.contains("4/4"), "missing progress in {html}");
    assert!(html.contains("2023-11-14 22:13"), "missing timestamp in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn direction_survives_a_round_trip_through_the_quiz() {
    let mut harness = setup_view_harness(ViewKind::Lessons, vec![lesson("1", &WORDS)]);
    harness.rebuild();
    harness.settle().await;
    harness.set_direction(Direction::Reverse);
    harness.settle().await;

    harness.show(ViewKind::Quiz {
        lesson: "1",
        reverse: true,
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "quiz did not start in {html}");
    assert_eq!(
        harness.services.runner().snapshot().question().map(|q| q.direction),
        Some(Direction::Reverse)
    );

    harness.show(ViewKind::Lessons);
    harness.settle().await;
    let html = harness.render();
    assert_eq!(harness.direction(), Direction::Reverse);
    assert!(html.contains("Mode: Translation → term"), "mode reset in {html}");
    assert!(html.contains("/quiz/1/true"), "reverse link missing in {html}");
    // Leaving the quiz view abandons the run.
    assert_eq!(harness.services.runner().snapshot(), QuizSnapshot::Idle);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            lesson: "1",
            reverse: false,
        },
        vec![lesson("1", &WORDS)],
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing heading in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert_eq!(html.matches("class=\"option-button\"").count(), 4, "{html}");
    let snapshot = harness.services.runner().snapshot();
    let question = snapshot.question().expect("question published");
    assert_eq!(question.status, SessionStatus::Active);
    assert!(html.contains(&question.prompt), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_lessons_without_questions() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            lesson: "tiny",
            reverse: false,
        },
        vec![lesson("tiny", &WORDS[..2])],
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("No questions in this lesson"),
        "missing unavailable message in {html}"
    );
    assert!(html.contains("has 2 distinct answers"), "missing detail in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dropping_the_quiz_view_leaves_the_run() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz {
            lesson: "1",
            reverse: false,
        },
        vec![lesson("1", &WORDS)],
    );
    harness.rebuild();
    harness.settle().await;
    let runner = harness.services.runner();
    assert!(runner.snapshot().question().is_some());

    drop(harness);
    assert_eq!(runner.snapshot(), QuizSnapshot::Idle);
}

#[derive(Props, Clone, PartialEq)]
struct PanelHarnessProps {
    vm: QuestionVm,
}

#[component]
fn PanelHarness(props: PanelHarnessProps) -> Element {
    rsx! {
        QuestionPanel { vm: props.vm.clone(), on_answer: move |_: String| {} }
    }
}

#[test]
fn question_panel_renders_feedback_classes() {
    let snapshot = QuestionSnapshot {
        lesson_id: LessonId::new("1").unwrap(),
        direction: Direction::Forward,
        index: 1,
        total: 5,
        prompt: "犬".into(),
        options: vec!["cat".into(), "dog".into(), "fire".into(), "water".into()],
        score: 10,
        status: SessionStatus::AnsweredWrong,
        selected: Some("cat".into()),
        correct_answer: Some("dog".into()),
        remaining_secs: None,
    };
    let mut dom = VirtualDom::new_with_props(
        PanelHarness,
        PanelHarnessProps {
            vm: QuestionVm::from(&snapshot),
        },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Question 2 of 5"), "missing heading in {html}");
    assert!(html.contains("option-button wrong-answer"), "missing wrong class in {html}");
    assert!(html.contains("option-button correct-answer"), "missing correct class in {html}");
    assert!(html.contains("Wrong answer."), "missing feedback in {html}");
    assert!(html.contains("Score: 10"), "missing score in {html}");
}
