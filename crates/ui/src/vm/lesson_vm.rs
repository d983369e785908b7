use quiz_core::model::{Direction, LessonId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub id: String,
    pub label: String,
}

impl From<&LessonId> for LessonItemVm {
    fn from(id: &LessonId) -> Self {
        Self {
            id: id.as_str().to_string(),
            label: format!("Lesson {id}"),
        }
    }
}

#[must_use]
pub fn map_lesson_items(ids: &[LessonId]) -> Vec<LessonItemVm> {
    ids.iter().map(LessonItemVm::from).collect()
}

/// Label for the direction toggle.
#[must_use]
pub fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "Term → translation",
        Direction::Reverse => "Translation → term",
    }
}
