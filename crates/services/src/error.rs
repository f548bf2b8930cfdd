//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ReportError;

/// Why the session rejected an operation.
///
/// A rejection is ordinary control flow for the answer loop: the session
/// state is left exactly as it was, and the caller surfaces the reason to
/// the learner.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTransition {
    #[error("the current question is already checked")]
    AlreadyChecked,
    #[error("the current question has not been checked yet")]
    NotChecked,
    #[error("no answer has been committed for the current question")]
    MissingAnswer,
    #[error("short answers need a self-assessment before advancing")]
    SelfAssessmentPending,
    #[error("auto-graded questions cannot be self-assessed")]
    AutoGraded,
    #[error("the current question takes free text, not an option")]
    NotOptionBased,
    #[error("the current question takes an option, not free text")]
    NotFreeText,
    #[error("the current question is malformed and cannot be answered")]
    Unanswerable,
    #[error("the quiz is already completed")]
    Completed,
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for the quiz")]
    Empty,
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Errors emitted by question providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("the provider returned an empty response")]
    EmptyResponse,
    #[error("the provider returned an unusable quiz: {0}")]
    InvalidPayload(String),
    #[error("question generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by speech synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech synthesis is not configured")]
    Disabled,
    #[error("the synthesizer returned no audio")]
    EmptyAudio,
    #[error("speech synthesis failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by image generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageError {
    #[error("image generation is not configured")]
    Disabled,
    #[error("the image service returned no image")]
    EmptyResponse,
    #[error("image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("image generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Speech(#[from] SpeechError),
    #[error("the current question has nothing to narrate")]
    NoNarration,
}
