#![forbid(unsafe_code)]

pub mod matcher;
pub mod model;
pub mod time;

pub use matcher::answer_matches;
pub use model::{Question, QuestionError, QuestionKind, ReportError, ScoreReport};
pub use time::Clock;
