use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::answer_matches;
use quiz_core::model::{Question, QuestionError, QuestionKind, ScoreReport};

use super::progress::SessionProgress;
use crate::error::{InvalidTransition, SessionError};

//
// ─── ANSWER SLOT ───────────────────────────────────────────────────────────────
//

/// Per-question answer state, index-aligned with the quiz questions.
#[derive(Debug, Clone, Default)]
struct AnswerSlot {
    /// Committed answer. Set by selecting an option, or by checking a draft.
    answer: Option<String>,
    /// Uncommitted free-text input, kept per question across navigation.
    draft: String,
    /// Once true, the answer is frozen and the solution is revealed.
    checked: bool,
    /// Learner verdict for short answers, recorded after the reveal.
    self_assessment: Option<bool>,
    /// Why the question failed validation at session start, if it did.
    degraded: Option<QuestionError>,
}

impl AnswerSlot {
    fn for_question(question: &Question) -> Self {
        Self {
            degraded: question.validate().err(),
            ..Self::default()
        }
    }

    /// Final verdict for this slot, `None` while unresolved.
    fn verdict(&self, question: &Question) -> Option<bool> {
        if self.degraded.is_some() || !self.checked {
            return None;
        }
        if question.kind.is_auto_graded() {
            Some(answer_matches(self.answer.as_deref(), &question.answer))
        } else {
            self.self_assessment
        }
    }
}

//
// ─── ADVANCE OUTCOME ───────────────────────────────────────────────────────────
//

/// What happened after advancing past the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved on to the next question.
    Continue,
    /// The quiz finished and produced its report.
    Completed(ScoreReport),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz attempt.
///
/// Holds the questions together with one answer slot apiece and a cursor
/// that only ever points at a real question. Answering is strictly staged:
/// commit an answer, check it, self-assess if the question is free text,
/// then advance. A rejected operation returns `InvalidTransition` and
/// leaves every slot exactly as it was.
///
/// Questions that fail validation are degraded at construction: they render
/// but refuse answering, and the advance gate waves them through so one bad
/// question cannot wedge the quiz.
pub struct QuizSession {
    questions: Vec<Question>,
    slots: Vec<AnswerSlot>,
    current: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over the given questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let slots = questions.iter().map(AnswerSlot::for_question).collect();
        Ok(Self {
            questions,
            slots,
            current: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Cursor position. Always indexes a real question, even after completion.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Committed answer for the current question.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.slot().answer.as_deref()
    }

    /// Uncommitted free-text input for the current question.
    #[must_use]
    pub fn current_draft(&self) -> &str {
        &self.slot().draft
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.slot().checked
    }

    #[must_use]
    pub fn self_assessment(&self) -> Option<bool> {
        self.slot().self_assessment
    }

    /// Why the current question was degraded, if it was.
    #[must_use]
    pub fn degradation(&self) -> Option<&QuestionError> {
        self.slot().degraded.as_ref()
    }

    #[must_use]
    pub fn is_unanswerable(&self) -> bool {
        self.slot().degraded.is_some()
    }

    /// Verdict for the current question, `None` until it is resolved.
    #[must_use]
    pub fn current_verdict(&self) -> Option<bool> {
        self.slot().verdict(self.current_question())
    }

    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.degraded.is_some()).count()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let degraded = self.degraded_count();
        let answered = self.slots.iter().filter(|s| s.checked).count();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(degraded).saturating_sub(answered),
            degraded,
            is_complete: self.is_complete(),
        }
    }

    //
    // ─── GUARDS ────────────────────────────────────────────────────────────────
    //

    /// True when the current question has a committed answer.
    #[must_use]
    pub fn has_answer(&self) -> bool {
        self.slot().answer.is_some()
    }

    /// True when `check_answer` would succeed right now.
    #[must_use]
    pub fn can_check(&self) -> bool {
        if self.is_complete() || self.is_unanswerable() || self.is_checked() {
            return false;
        }
        match self.current_question().kind {
            QuestionKind::MultipleChoice | QuestionKind::Ox => self.has_answer(),
            QuestionKind::ShortAnswer => !self.slot().draft.trim().is_empty(),
        }
    }

    /// True when the current question is waiting on a learner verdict.
    #[must_use]
    pub fn can_self_assess(&self) -> bool {
        !self.is_complete()
            && !self.is_unanswerable()
            && self.is_checked()
            && !self.current_question().kind.is_auto_graded()
    }

    /// True when `go_next` would pass the gate for the current question.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        if self.is_complete() {
            return false;
        }
        if self.is_unanswerable() {
            return true;
        }
        if !self.is_checked() {
            return false;
        }
        self.current_question().kind.is_auto_graded() || self.self_assessment().is_some()
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Commit an option as the answer to the current question.
    ///
    /// May be called repeatedly to change the selection until the answer is
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the quiz is complete, the question is
    /// degraded or not option-based, or the answer is already checked.
    pub fn select_option(&mut self, option: &str) -> Result<(), SessionError> {
        self.guard_answerable()?;
        if !self.current_question().kind.is_option_based() {
            return Err(InvalidTransition::NotOptionBased.into());
        }
        if self.is_checked() {
            return Err(InvalidTransition::AlreadyChecked.into());
        }
        self.slot_mut().answer = Some(option.to_string());
        Ok(())
    }

    /// Update the free-text draft for the current question.
    ///
    /// The draft is not an answer yet; it becomes one when checked.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the quiz is complete, the question is
    /// degraded or not free text, or the answer is already checked.
    pub fn set_draft(&mut self, text: &str) -> Result<(), SessionError> {
        self.guard_answerable()?;
        if self.current_question().kind != QuestionKind::ShortAnswer {
            return Err(InvalidTransition::NotFreeText.into());
        }
        if self.is_checked() {
            return Err(InvalidTransition::AlreadyChecked.into());
        }
        self.slot_mut().draft = text.to_string();
        Ok(())
    }

    /// Freeze the current answer and reveal the solution.
    ///
    /// Checking is monotonic: once checked, the answer can never change,
    /// even after navigating away and back.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition::MissingAnswer` if nothing has been
    /// committed (or, for free text, if the draft is blank), and the usual
    /// rejections for completed quizzes, degraded questions, and
    /// already-checked answers.
    pub fn check_answer(&mut self) -> Result<(), SessionError> {
        self.guard_answerable()?;
        if self.is_checked() {
            return Err(InvalidTransition::AlreadyChecked.into());
        }
        match self.current_question().kind {
            QuestionKind::MultipleChoice | QuestionKind::Ox => {
                if !self.has_answer() {
                    return Err(InvalidTransition::MissingAnswer.into());
                }
            }
            QuestionKind::ShortAnswer => {
                if self.slot().draft.trim().is_empty() {
                    return Err(InvalidTransition::MissingAnswer.into());
                }
                let draft = self.slot().draft.clone();
                self.slot_mut().answer = Some(draft);
            }
        }
        self.slot_mut().checked = true;
        Ok(())
    }

    /// Record the learner's own verdict on a checked short answer.
    ///
    /// The verdict may be revised until the quiz completes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition::AutoGraded` for option-based questions
    /// and `InvalidTransition::NotChecked` before the reveal.
    pub fn self_assess(&mut self, correct: bool) -> Result<(), SessionError> {
        self.guard_answerable()?;
        if self.current_question().kind.is_auto_graded() {
            return Err(InvalidTransition::AutoGraded.into());
        }
        if !self.is_checked() {
            return Err(InvalidTransition::NotChecked.into());
        }
        self.slot_mut().self_assessment = Some(correct);
        Ok(())
    }

    /// Step back one question. Returns whether the cursor moved.
    pub fn go_prev(&mut self) -> bool {
        if self.is_complete() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Advance past the current question.
    ///
    /// The gate requires the current question to be resolved: checked, and
    /// self-assessed where that applies. Degraded questions pass the gate
    /// unconditionally. Advancing from the last question completes the quiz
    /// and produces its report; the report is handed out exactly once, and
    /// every later call is rejected.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when the gate rejects the advance, and
    /// `SessionError::Report` if the report cannot be assembled. A failed
    /// report leaves the quiz incomplete so the call can be retried.
    pub fn go_next(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        if self.is_complete() {
            return Err(InvalidTransition::Completed.into());
        }
        if !self.is_unanswerable() {
            if !self.is_checked() {
                return Err(InvalidTransition::NotChecked.into());
            }
            if self.can_self_assess() && self.self_assessment().is_none() {
                return Err(InvalidTransition::SelfAssessmentPending.into());
            }
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            return Ok(AdvanceOutcome::Continue);
        }

        let report = self.build_report(now)?;
        self.completed_at = Some(now);
        Ok(AdvanceOutcome::Completed(report))
    }

    fn build_report(&self, completed_at: DateTime<Utc>) -> Result<ScoreReport, SessionError> {
        let user_answers = self.slots.iter().map(|slot| slot.answer.clone()).collect();
        let correctness = self
            .slots
            .iter()
            .zip(&self.questions)
            .map(|(slot, question)| slot.verdict(question))
            .collect();
        Ok(ScoreReport::from_correctness(
            self.started_at,
            completed_at,
            user_answers,
            correctness,
        )?)
    }

    fn guard_answerable(&self) -> Result<(), InvalidTransition> {
        if self.is_complete() {
            return Err(InvalidTransition::Completed);
        }
        if self.is_unanswerable() {
            return Err(InvalidTransition::Unanswerable);
        }
        Ok(())
    }

    fn slot(&self) -> &AnswerSlot {
        &self.slots[self.current]
    }

    fn slot_mut(&mut self) -> &mut AnswerSlot {
        &mut self.slots[self.current]
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("checked", &self.slots.iter().filter(|s| s.checked).count())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn capital_choice() -> Question {
        Question::new(
            QuestionKind::MultipleChoice,
            "What is the capital of France?",
            vec!["Paris".into(), "Rome".into(), "Berlin".into()],
            "Paris",
            "Paris has been the French capital since 987.",
        )
    }

    fn sun_ox() -> Question {
        Question::new(
            QuestionKind::Ox,
            "The sun is a star.",
            vec!["O".into(), "X".into()],
            "O",
            "It is a main-sequence star.",
        )
    }

    fn ocean_short() -> Question {
        Question::new(
            QuestionKind::ShortAnswer,
            "Name the largest ocean.",
            Vec::new(),
            "Pacific",
            "The Pacific covers about a third of the surface.",
        )
    }

    fn broken_choice() -> Question {
        Question::new(
            QuestionKind::MultipleChoice,
            "Pick the right answer.",
            Vec::new(),
            "Right",
            "",
        )
    }

    fn session(questions: Vec<Question>) -> QuizSession {
        QuizSession::new(questions, fixed_now()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = QuizSession::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn option_flow_grades_with_the_matcher() {
        let mut quiz = session(vec![capital_choice()]);
        assert!(!quiz.has_answer());
        assert!(!quiz.can_check());

        quiz.select_option("Rome").unwrap();
        quiz.select_option("Paris").unwrap();
        assert_eq!(quiz.current_answer(), Some("Paris"));
        assert!(quiz.can_check());
        assert_eq!(quiz.current_verdict(), None);

        quiz.check_answer().unwrap();
        assert!(quiz.is_checked());
        assert_eq!(quiz.current_verdict(), Some(true));
        assert!(quiz.can_advance());
    }

    #[test]
    fn trailing_punctuation_does_not_fail_the_grade() {
        let question = Question::new(
            QuestionKind::MultipleChoice,
            "What is the capital of France?",
            vec!["Paris.".into(), "Rome".into()],
            "Paris",
            "",
        );
        let mut quiz = session(vec![question]);
        quiz.select_option("Paris.").unwrap();
        quiz.check_answer().unwrap();
        assert_eq!(quiz.current_verdict(), Some(true));
    }

    #[test]
    fn checked_answers_are_frozen() {
        let mut quiz = session(vec![capital_choice()]);
        quiz.select_option("Rome").unwrap();
        quiz.check_answer().unwrap();

        let err = quiz.select_option("Paris").unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::AlreadyChecked)
        );
        assert_eq!(quiz.current_answer(), Some("Rome"));
        assert_eq!(quiz.current_verdict(), Some(false));

        let err = quiz.check_answer().unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::AlreadyChecked)
        );
    }

    #[test]
    fn check_requires_a_committed_answer() {
        let mut quiz = session(vec![capital_choice()]);
        let err = quiz.check_answer().unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::MissingAnswer)
        );
        assert!(!quiz.is_checked());
    }

    #[test]
    fn input_kind_mismatches_are_rejected() {
        let mut quiz = session(vec![capital_choice(), ocean_short()]);

        let err = quiz.set_draft("Paris").unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::NotFreeText)
        );

        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        quiz.go_next(fixed_now()).unwrap();

        let err = quiz.select_option("Pacific").unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::NotOptionBased)
        );
    }

    #[test]
    fn short_answer_flow_commits_the_draft_verbatim() {
        let mut quiz = session(vec![ocean_short()]);
        quiz.set_draft(" pacific. ").unwrap();
        assert!(!quiz.has_answer());
        assert!(quiz.can_check());

        quiz.check_answer().unwrap();
        assert_eq!(quiz.current_answer(), Some(" pacific. "));
        assert_eq!(quiz.current_verdict(), None);
        assert!(quiz.can_self_assess());
        assert!(!quiz.can_advance());

        let err = quiz.set_draft("atlantic").unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::AlreadyChecked)
        );
        assert_eq!(quiz.current_answer(), Some(" pacific. "));

        quiz.self_assess(true).unwrap();
        assert_eq!(quiz.current_verdict(), Some(true));
        assert!(quiz.can_advance());
    }

    #[test]
    fn blank_drafts_cannot_be_checked() {
        let mut quiz = session(vec![ocean_short()]);
        quiz.set_draft("   ").unwrap();
        assert!(!quiz.can_check());
        let err = quiz.check_answer().unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::MissingAnswer)
        );
    }

    #[test]
    fn self_assessment_guards() {
        let mut quiz = session(vec![ocean_short(), sun_ox()]);

        let err = quiz.self_assess(true).unwrap_err();
        assert_eq!(err, SessionError::Transition(InvalidTransition::NotChecked));

        quiz.set_draft("Pacific").unwrap();
        quiz.check_answer().unwrap();
        quiz.self_assess(false).unwrap();
        quiz.self_assess(true).unwrap();
        assert_eq!(quiz.current_verdict(), Some(true));

        quiz.go_next(fixed_now()).unwrap();
        quiz.select_option("O").unwrap();
        quiz.check_answer().unwrap();
        let err = quiz.self_assess(true).unwrap_err();
        assert_eq!(err, SessionError::Transition(InvalidTransition::AutoGraded));
    }

    #[test]
    fn advance_gate_rejections() {
        let mut quiz = session(vec![capital_choice(), ocean_short()]);

        let err = quiz.go_next(fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::Transition(InvalidTransition::NotChecked));

        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        quiz.go_next(fixed_now()).unwrap();

        quiz.set_draft("Pacific").unwrap();
        quiz.check_answer().unwrap();
        let err = quiz.go_next(fixed_now()).unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::SelfAssessmentPending)
        );
    }

    #[test]
    fn navigation_is_bounded_and_preserves_state() {
        let mut quiz = session(vec![capital_choice(), ocean_short()]);
        assert!(!quiz.go_prev());

        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        assert_eq!(quiz.go_next(fixed_now()).unwrap(), AdvanceOutcome::Continue);
        assert_eq!(quiz.current_index(), 1);

        quiz.set_draft("Atlantic").unwrap();
        assert!(quiz.go_prev());
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.current_answer(), Some("Paris"));
        assert!(quiz.is_checked());

        assert_eq!(quiz.go_next(fixed_now()).unwrap(), AdvanceOutcome::Continue);
        assert_eq!(quiz.current_draft(), "Atlantic");
        assert!(!quiz.is_checked());
    }

    #[test]
    fn completion_reports_exactly_once() {
        let mut clock = fixed_clock();
        let mut quiz = QuizSession::new(vec![capital_choice(), sun_ox()], clock.now()).unwrap();
        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        quiz.go_next(clock.now()).unwrap();

        quiz.select_option("X").unwrap();
        quiz.check_answer().unwrap();
        clock.advance(Duration::seconds(45));
        let outcome = quiz.go_next(clock.now()).unwrap();
        let AdvanceOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert!(quiz.is_complete());
        assert_eq!(quiz.completed_at(), Some(clock.now()));
        assert_eq!(report.duration(), Duration::seconds(45));
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.total_count(), 2);
        assert_eq!(report.correctness(), &[Some(true), Some(false)]);
        assert_eq!(
            report.user_answers(),
            &[Some("Paris".to_string()), Some("X".to_string())]
        );

        let err = quiz.go_next(clock.now()).unwrap_err();
        assert_eq!(err, SessionError::Transition(InvalidTransition::Completed));
        let err = quiz.select_option("O").unwrap_err();
        assert_eq!(err, SessionError::Transition(InvalidTransition::Completed));
        assert!(!quiz.go_prev());
        assert_eq!(quiz.current_index(), 1);
    }

    #[test]
    fn mixed_kinds_score_two_of_three() {
        let mut quiz = session(vec![capital_choice(), sun_ox(), ocean_short()]);
        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        quiz.go_next(fixed_now()).unwrap();

        quiz.select_option("X").unwrap();
        quiz.check_answer().unwrap();
        quiz.go_next(fixed_now()).unwrap();

        quiz.set_draft("Pacific").unwrap();
        quiz.check_answer().unwrap();
        quiz.self_assess(true).unwrap();
        let AdvanceOutcome::Completed(report) = quiz.go_next(fixed_now()).unwrap() else {
            panic!("expected completion");
        };

        assert_eq!(report.correct_count(), 2);
        assert_eq!(report.total_count(), 3);
        assert!((report.score_percentage() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            report.correctness(),
            &[Some(true), Some(false), Some(true)]
        );
    }

    #[test]
    fn malformed_questions_degrade_instead_of_crashing() {
        let mut quiz = session(vec![broken_choice(), sun_ox()]);
        assert!(quiz.is_unanswerable());
        assert!(matches!(
            quiz.degradation(),
            Some(QuestionError::MissingOptions { .. })
        ));

        let err = quiz.select_option("Right").unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::Unanswerable)
        );
        let err = quiz.check_answer().unwrap_err();
        assert_eq!(
            err,
            SessionError::Transition(InvalidTransition::Unanswerable)
        );

        assert!(quiz.can_advance());
        quiz.go_next(fixed_now()).unwrap();
        quiz.select_option("O").unwrap();
        quiz.check_answer().unwrap();
        let outcome = quiz.go_next(fixed_now()).unwrap();
        let AdvanceOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(report.total_count(), 2);
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.correctness(), &[None, Some(true)]);
        assert_eq!(report.user_answers()[0], None);
    }

    #[test]
    fn fully_degraded_quiz_still_completes() {
        let mut quiz = session(vec![broken_choice()]);
        let outcome = quiz.go_next(fixed_now()).unwrap();
        let AdvanceOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(report.correct_count(), 0);
        assert_eq!(report.score_percentage(), 0.0);
    }

    #[test]
    fn failed_report_leaves_the_quiz_retryable() {
        let mut quiz = session(vec![sun_ox()]);
        quiz.select_option("O").unwrap();
        quiz.check_answer().unwrap();

        let before_start = fixed_now() - Duration::seconds(1);
        let err = quiz.go_next(before_start).unwrap_err();
        assert!(matches!(err, SessionError::Report(_)));
        assert!(!quiz.is_complete());

        let outcome = quiz.go_next(fixed_now()).unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Completed(_)));
    }

    #[test]
    fn progress_tracks_checked_and_degraded_questions() {
        let mut quiz = session(vec![capital_choice(), broken_choice(), sun_ox()]);
        let progress = quiz.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 0);
        assert_eq!(progress.degraded, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);

        quiz.select_option("Paris").unwrap();
        quiz.check_answer().unwrap();
        let progress = quiz.progress();
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 1);
    }
}
