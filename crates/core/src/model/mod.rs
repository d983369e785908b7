mod ids;
mod lesson;
mod question;
mod session;

pub use ids::{LessonId, ParseIdError};

pub use lesson::{Direction, Lesson, LessonError, WordList, WordPair};
pub use question::{OPTION_COUNT, QuestionError, QuestionItem};
pub use session::{POINTS_PER_CORRECT, ScoreRecord, ScoreRecordError, SessionEnd, SessionResult};
