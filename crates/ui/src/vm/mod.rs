mod lesson_vm;
mod quiz_vm;
mod score_vm;
mod time_fmt;

pub use lesson_vm::{LessonItemVm, direction_label, map_lesson_items};
pub use quiz_vm::{
    FeedbackVm, OPTION_CLASS, OPTION_CORRECT_CLASS, OPTION_WRONG_CLASS, OptionVm, QuestionVm,
    QuizScreenVm, map_quiz_snapshot, option_class,
};
pub use score_vm::{ScoreRowVm, map_score_rows, outcome_label, result_summary};
pub use time_fmt::{format_countdown, format_datetime};
