//! Domain model shared by the service and app layers.

mod question;
mod report;

pub use question::{Question, QuestionError, QuestionKind};
pub use report::{ReportError, ScoreReport};
