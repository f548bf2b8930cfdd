mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{InvalidTransition, SessionError};
pub use progress::SessionProgress;
pub use service::{AdvanceOutcome, QuizSession};
pub use workflow::QuizLoopService;
