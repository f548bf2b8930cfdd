use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a question cannot be answered as its declared kind.
///
/// Questions usually arrive from an AI collaborator, so a shape violation is
/// an expected runtime condition rather than a programming error. Callers
/// degrade the offending question instead of aborting the quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("canonical answer cannot be empty")]
    EmptyAnswer,

    #[error("{kind} questions need answer options")]
    MissingOptions { kind: QuestionKind },

    #[error("short-answer questions must not carry options")]
    UnexpectedOptions,
}

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// Closed set of question formats the session knows how to grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Several candidate answers, auto-graded against the canonical one.
    MultipleChoice,
    /// Free text, graded by the learner's own assessment after reveal.
    ShortAnswer,
    /// Binary true/false question answered with `O` or `X`, auto-graded.
    Ox,
}

impl QuestionKind {
    /// True when correctness is decided by the matcher rather than the learner.
    #[must_use]
    pub fn is_auto_graded(self) -> bool {
        match self {
            QuestionKind::MultipleChoice | QuestionKind::Ox => true,
            QuestionKind::ShortAnswer => false,
        }
    }

    /// True when the learner answers by picking from a fixed option list.
    #[must_use]
    pub fn is_option_based(self) -> bool {
        self.is_auto_graded()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::ShortAnswer => "short-answer",
            QuestionKind::Ox => "ox",
        };
        f.write_str(label)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One quiz question as produced by a provider or loaded from a file.
///
/// The struct is plain data on purpose: providers deserialize straight into
/// it and a malformed instance must survive long enough for the session to
/// degrade it visibly. Call [`Question::validate`] to learn whether the
/// question can actually be answered as its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub kind: QuestionKind,
    /// Prompt shown to the learner. Deserialization tolerates a missing
    /// value so the slot can degrade instead of sinking the whole quiz.
    #[serde(default)]
    pub text: String,
    /// Candidate answers. Empty for short-answer questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Canonical answer, compared via the matcher for auto-graded kinds.
    #[serde(default)]
    pub answer: String,
    /// Explanation revealed together with the answer.
    #[serde(default)]
    pub explanation: String,
    /// Reading passage the question refers to, when the topic calls for one.
    #[serde(default)]
    pub passage: Option<String>,
    #[serde(default)]
    pub passage_translation: Option<String>,
    /// Prompt for an illustrative image, consumed by the image collaborator.
    #[serde(default)]
    pub image_prompt: Option<String>,
    /// Narration script for the speech collaborator. Falls back to the
    /// passage when absent.
    #[serde(default)]
    pub audio_script: Option<String>,
}

impl Question {
    /// Builds a question with no enrichment attachments.
    #[must_use]
    pub fn new(
        kind: QuestionKind,
        text: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            options,
            answer: answer.into(),
            explanation: explanation.into(),
            passage: None,
            passage_translation: None,
            image_prompt: None,
            audio_script: None,
        }
    }

    #[must_use]
    pub fn with_passage(mut self, passage: impl Into<String>) -> Self {
        self.passage = Some(passage.into());
        self
    }

    #[must_use]
    pub fn with_passage_translation(mut self, translation: impl Into<String>) -> Self {
        self.passage_translation = Some(translation.into());
        self
    }

    #[must_use]
    pub fn with_image_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.image_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_audio_script(mut self, script: impl Into<String>) -> Self {
        self.audio_script = Some(script.into());
        self
    }

    /// Checks that the question is answerable as its declared kind.
    ///
    /// # Errors
    ///
    /// Returns the first shape violation found: empty text, empty canonical
    /// answer, a missing option list on an option-based kind, or a stray
    /// option list on a short-answer question.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        match self.kind {
            QuestionKind::MultipleChoice | QuestionKind::Ox => {
                if self.options.is_empty() {
                    return Err(QuestionError::MissingOptions { kind: self.kind });
                }
            }
            QuestionKind::ShortAnswer => {
                if !self.options.is_empty() {
                    return Err(QuestionError::UnexpectedOptions);
                }
            }
        }
        Ok(())
    }

    /// Text the speech collaborator should read aloud, if any.
    #[must_use]
    pub fn narration(&self) -> Option<&str> {
        self.audio_script.as_deref().or(self.passage.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(options: &[&str]) -> Question {
        Question::new(
            QuestionKind::MultipleChoice,
            "Which planet is known as the red planet?",
            options.iter().map(|o| (*o).to_string()).collect(),
            "Mars",
            "Iron oxide dust gives Mars its color.",
        )
    }

    #[test]
    fn well_formed_questions_validate() {
        assert!(choice(&["Mars", "Venus"]).validate().is_ok());

        let short = Question::new(
            QuestionKind::ShortAnswer,
            "Name the largest ocean.",
            Vec::new(),
            "Pacific",
            "",
        );
        assert!(short.validate().is_ok());
    }

    #[test]
    fn option_based_kinds_require_options() {
        let err = choice(&[]).validate().unwrap_err();
        assert_eq!(
            err,
            QuestionError::MissingOptions {
                kind: QuestionKind::MultipleChoice
            }
        );

        let ox = Question::new(QuestionKind::Ox, "The sun is a star.", Vec::new(), "O", "");
        assert!(matches!(
            ox.validate(),
            Err(QuestionError::MissingOptions {
                kind: QuestionKind::Ox
            })
        ));
    }

    #[test]
    fn short_answer_rejects_options() {
        let q = Question::new(
            QuestionKind::ShortAnswer,
            "Name the largest ocean.",
            vec!["Pacific".into()],
            "Pacific",
            "",
        );
        assert_eq!(q.validate(), Err(QuestionError::UnexpectedOptions));
    }

    #[test]
    fn blank_text_and_answer_are_rejected() {
        let mut q = choice(&["Mars", "Venus"]);
        q.text = "   ".into();
        assert_eq!(q.validate(), Err(QuestionError::EmptyText));

        let mut q = choice(&["Mars", "Venus"]);
        q.answer = String::new();
        assert_eq!(q.validate(), Err(QuestionError::EmptyAnswer));
    }

    #[test]
    fn narration_prefers_the_audio_script() {
        let q = choice(&["Mars", "Venus"])
            .with_passage("A passage about planets.")
            .with_audio_script("Read this aloud.");
        assert_eq!(q.narration(), Some("Read this aloud."));

        let q = choice(&["Mars", "Venus"]).with_passage("A passage about planets.");
        assert_eq!(q.narration(), Some("A passage about planets."));

        assert_eq!(choice(&["Mars", "Venus"]).narration(), None);
    }

    #[test]
    fn kind_serializes_in_kebab_case() {
        let json = serde_json::to_string(&QuestionKind::MultipleChoice).unwrap();
        assert_eq!(json, "\"multiple-choice\"");
        let kind: QuestionKind = serde_json::from_str("\"ox\"").unwrap();
        assert_eq!(kind, QuestionKind::Ox);
    }

    #[test]
    fn enrichment_fields_are_optional_in_json() {
        let q: Question = serde_json::from_str(
            r#"{"kind":"short-answer","text":"Capital of France?","answer":"Paris"}"#,
        )
        .unwrap();
        assert!(q.validate().is_ok());
        assert!(q.options.is_empty());
        assert!(q.passage.is_none());
    }
}
