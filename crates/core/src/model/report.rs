use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors rejected by [`ScoreReport::from_correctness`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completion time precedes start time")]
    InvalidTimeRange,

    #[error("a report needs at least one question")]
    Empty,

    #[error("answers ({answers}) and correctness ({correctness}) are not index-aligned")]
    LengthMismatch { answers: usize, correctness: usize },

    #[error("too many questions for one report: {len}")]
    TooManyQuestions { len: usize },
}

/// Aggregate outcome of a completed quiz attempt.
///
/// Instances only exist through [`ScoreReport::from_correctness`], so a
/// report in hand is internally consistent: the percentage agrees with the
/// counts, and the per-question vectors are index-aligned with the quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    score_percentage: f64,
    correct_count: u32,
    total_count: u32,
    user_answers: Vec<Option<String>>,
    correctness: Vec<Option<bool>>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl ScoreReport {
    /// Builds a report from per-question verdicts.
    ///
    /// `correctness` holds one entry per question: `Some(true)` counted as
    /// correct, `Some(false)` as wrong, and `None` for questions that never
    /// received a verdict (degraded slots). Unresolved entries still count
    /// toward the total, so the percentage never flatters an incomplete run.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`, `ReportError::Empty` for a zero-question report,
    /// `ReportError::LengthMismatch` if the vectors disagree in length, and
    /// `ReportError::TooManyQuestions` if the count does not fit in `u32`.
    pub fn from_correctness(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        user_answers: Vec<Option<String>>,
        correctness: Vec<Option<bool>>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        if correctness.is_empty() {
            return Err(ReportError::Empty);
        }
        if user_answers.len() != correctness.len() {
            return Err(ReportError::LengthMismatch {
                answers: user_answers.len(),
                correctness: correctness.len(),
            });
        }
        let total_count = u32::try_from(correctness.len()).map_err(|_| {
            ReportError::TooManyQuestions {
                len: correctness.len(),
            }
        })?;
        let correct = correctness.iter().filter(|c| **c == Some(true)).count();
        let correct_count =
            u32::try_from(correct).map_err(|_| ReportError::TooManyQuestions { len: correct })?;
        let score_percentage = f64::from(correct_count) / f64::from(total_count) * 100.0;

        Ok(Self {
            score_percentage,
            correct_count,
            total_count,
            user_answers,
            correctness,
            started_at,
            completed_at,
        })
    }

    /// Share of correct answers in the range `0.0..=100.0`.
    #[must_use]
    pub fn score_percentage(&self) -> f64 {
        self.score_percentage
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Final committed answer per question, `None` where nothing was committed.
    #[must_use]
    pub fn user_answers(&self) -> &[Option<String>] {
        &self.user_answers
    }

    /// Per-question verdict, index-aligned with the quiz.
    #[must_use]
    pub fn correctness(&self) -> &[Option<bool>] {
        &self.correctness
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Wall-clock time the attempt took.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }
}
