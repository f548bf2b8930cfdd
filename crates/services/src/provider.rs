//! Collaborator contracts for question and narration sources.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quiz_core::model::Question;

use crate::error::{ProviderError, SpeechError};

//
// ─── QUIZ REQUEST ──────────────────────────────────────────────────────────────
//

/// How demanding the generated questions should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

/// Parameters for one quiz generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    topic: String,
    question_count: u8,
    difficulty: Difficulty,
}

impl QuizRequest {
    pub const MIN_QUESTIONS: u8 = 1;
    pub const MAX_QUESTIONS: u8 = 20;
    pub const DEFAULT_QUESTIONS: u8 = 5;

    /// Builds a request, clamping the question count into the supported range.
    #[must_use]
    pub fn new(topic: impl Into<String>, question_count: u8, difficulty: Difficulty) -> Self {
        Self {
            topic: topic.into(),
            question_count: question_count.clamp(Self::MIN_QUESTIONS, Self::MAX_QUESTIONS),
            difficulty,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.question_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── COLLABORATOR CONTRACTS ────────────────────────────────────────────────────
//

/// Synthesized narration audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Contract for quiz question sources.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Produce the questions for one quiz attempt.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider is disabled, unreachable, or
    /// returns an unusable payload.
    async fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, ProviderError>;
}

/// Contract for narration audio sources.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render the given text as audio.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the synthesizer is disabled or the request fails.
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, SpeechError>;
}

/// Fixed-list provider for offline runs and tests.
#[derive(Clone, Default)]
pub struct StaticQuestionProvider {
    questions: Vec<Question>,
}

impl StaticQuestionProvider {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionProvider for StaticQuestionProvider {
    async fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, ProviderError> {
        if self.questions.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        let count = usize::from(request.question_count());
        Ok(self.questions.iter().take(count).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionKind;

    #[test]
    fn question_count_is_clamped() {
        let request = QuizRequest::new("geography", 0, Difficulty::Easy);
        assert_eq!(request.question_count(), QuizRequest::MIN_QUESTIONS);

        let request = QuizRequest::new("geography", 200, Difficulty::Hard);
        assert_eq!(request.question_count(), QuizRequest::MAX_QUESTIONS);
    }

    #[tokio::test]
    async fn static_provider_serves_at_most_the_requested_count() {
        let questions = (0..4)
            .map(|i| {
                Question::new(
                    QuestionKind::Ox,
                    format!("Statement {i} is true."),
                    vec!["O".into(), "X".into()],
                    "O",
                    "",
                )
            })
            .collect();
        let provider = StaticQuestionProvider::new(questions);

        let request = QuizRequest::new("anything", 2, Difficulty::Normal);
        let quiz = provider.generate_quiz(&request).await.unwrap();
        assert_eq!(quiz.len(), 2);
    }

    #[tokio::test]
    async fn static_provider_rejects_an_empty_list() {
        let provider = StaticQuestionProvider::default();
        let request = QuizRequest::new("anything", 3, Difficulty::Normal);
        let err = provider.generate_quiz(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }
}
