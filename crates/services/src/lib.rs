#![forbid(unsafe_code)]

pub mod error;
pub mod generation_service;
pub mod provider;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{
    ImageError, InvalidTransition, ProviderError, QuizFlowError, SessionError, SpeechError,
};
pub use generation_service::{GenerationConfig, GenerationService};
pub use provider::{
    Difficulty, QuestionProvider, QuizRequest, SpeechClip, SpeechSynthesizer,
    StaticQuestionProvider,
};
pub use sessions::{AdvanceOutcome, QuizLoopService, QuizSession, SessionProgress};
