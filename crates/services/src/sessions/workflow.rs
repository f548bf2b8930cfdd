use std::sync::Arc;

use super::service::{AdvanceOutcome, QuizSession};
use crate::Clock;
use crate::error::{QuizFlowError, SessionError, SpeechError};
use crate::provider::{QuestionProvider, QuizRequest, SpeechClip, SpeechSynthesizer};

/// Orchestrates quiz generation and narration around the session.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    provider: Arc<dyn QuestionProvider>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, provider: Arc<dyn QuestionProvider>) -> Self {
        Self {
            clock,
            provider,
            speech: None,
        }
    }

    #[must_use]
    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    #[must_use]
    pub fn speech_enabled(&self) -> bool {
        self.speech.is_some()
    }

    /// Generate a quiz from the provider and open a session over it.
    ///
    /// Malformed questions are kept as degraded slots; the count is logged
    /// so the condition stays visible outside the answer loop.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError` when generation fails or yields no questions.
    pub async fn start_quiz(&self, request: &QuizRequest) -> Result<QuizSession, QuizFlowError> {
        log::info!(
            "generating quiz: topic={:?} count={} difficulty={}",
            request.topic(),
            request.question_count(),
            request.difficulty()
        );
        let questions = self.provider.generate_quiz(request).await?;
        let session = QuizSession::new(questions, self.clock.now())?;
        let degraded = session.degraded_count();
        if degraded > 0 {
            log::warn!(
                "{degraded} of {} questions are malformed and were degraded",
                session.total_questions()
            );
        }
        Ok(session)
    }

    /// Advance past the current question, stamping time from the service clock.
    ///
    /// # Errors
    ///
    /// Propagates the session's gate rejections and report failures.
    pub fn advance(&self, session: &mut QuizSession) -> Result<AdvanceOutcome, SessionError> {
        session.go_next(self.clock.now())
    }

    /// Narrate the current question's script or passage.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoNarration` when the question has nothing to
    /// read, `SpeechError::Disabled` when no synthesizer is wired, and the
    /// synthesizer's own failures otherwise.
    pub async fn passage_audio(&self, session: &QuizSession) -> Result<SpeechClip, QuizFlowError> {
        let text = session
            .current_question()
            .narration()
            .ok_or(QuizFlowError::NoNarration)?;
        let speech = self.speech.as_ref().ok_or(SpeechError::Disabled)?;
        Ok(speech.synthesize(text).await?)
    }
}
