//! DiagnosticSession aggregate.

use std::sync::Arc;

use super::{AnswerStore, FlowPhase, FlowState, SessionError};
use crate::domain::catalog::{Question, QuestionCatalog};
use crate::domain::foundation::{LeadRef, SessionId, StateMachine};

/// Why an `advance` request did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Not currently showing a question (affirmation, submitting, complete).
    NotInQuestion(FlowState),
    /// The current question has no non-blank answer.
    Unanswered(String),
}

/// Result of asking the session to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceStep {
    /// Nothing changed.
    Ignored(IgnoredReason),
    /// Now in `Affirmation(index)`; the caller owns the timer that ends it.
    Affirming { index: usize, message: String },
    /// Now in `Question(index)`.
    Moved(usize),
    /// Now in `Submitting`; the caller must run the submission protocol.
    Submit,
}

/// Position within the questionnaire, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    /// `position / total` as a whole percentage.
    pub percent: u8,
}

/// One lead's traversal of the question catalog.
///
/// # Invariants
///
/// - a session always has a lead reference
/// - `0 <= current_index < catalog.len()` for the whole session
/// - answers are never removed
/// - moving forward from `Question(i)` requires a non-blank answer for question `i`
#[derive(Debug, Clone)]
pub struct DiagnosticSession {
    id: SessionId,
    lead_ref: LeadRef,
    catalog: Arc<QuestionCatalog>,
    current_index: usize,
    answers: AnswerStore,
    phase: FlowPhase,
}

impl DiagnosticSession {
    /// Starts a session at `Question(0)`.
    pub fn new(lead_ref: LeadRef, catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            id: SessionId::new(),
            lead_ref,
            catalog,
            current_index: 0,
            answers: AnswerStore::new(),
            phase: FlowPhase::Question,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn lead_ref(&self) -> &LeadRef {
        &self.lead_ref
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// The observable state, with the index attached where it applies.
    pub fn state(&self) -> FlowState {
        match self.phase {
            FlowPhase::Question => FlowState::Question(self.current_index),
            FlowPhase::Affirmation => FlowState::Affirmation(self.current_index),
            FlowPhase::Submitting => FlowState::Submitting,
            FlowPhase::Complete => FlowState::Complete,
        }
    }

    /// The question at the current index.
    pub fn current_question(&self) -> &Question {
        // current_index is kept inside the catalog bounds and catalogs are never empty
        &self.catalog.as_slice()[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == self.catalog.last_index()
    }

    /// The affirmation text while in `Affirmation`.
    pub fn current_affirmation(&self) -> Option<&str> {
        match self.phase {
            FlowPhase::Affirmation => self.current_question().affirmation(),
            _ => None,
        }
    }

    /// True if the current question has a non-blank answer.
    pub fn can_advance(&self) -> bool {
        self.phase == FlowPhase::Question && self.answers.is_answered(&self.current_question().id)
    }

    /// True if `retreat` would move back.
    pub fn can_retreat(&self) -> bool {
        self.phase == FlowPhase::Question && self.current_index > 0
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.len();
        let position = self.current_index + 1;
        Progress {
            position,
            total,
            percent: ((position * 100) / total) as u8,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores an answer. Only allowed while a question is shown.
    ///
    /// # Errors
    ///
    /// - `InvalidPhase` outside `Question`
    /// - `UnknownQuestion` if the id is not in the catalog
    pub fn set_answer(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != FlowPhase::Question {
            return Err(SessionError::InvalidPhase(self.state()));
        }
        if !self.catalog.contains(id) {
            return Err(SessionError::UnknownQuestion(id.to_string()));
        }
        self.answers.set(id, text);
        Ok(())
    }

    /// Moves forward from the current question.
    ///
    /// Enters `Affirmation` when the question defines one; otherwise moves to
    /// the next question, or to `Submitting` from the last one.
    pub fn advance(&mut self) -> AdvanceStep {
        if self.phase != FlowPhase::Question {
            return AdvanceStep::Ignored(IgnoredReason::NotInQuestion(self.state()));
        }

        let question = self.current_question();
        if !self.answers.is_answered(&question.id) {
            return AdvanceStep::Ignored(IgnoredReason::Unanswered(question.id.clone()));
        }

        let affirmation = question.affirmation().map(str::to_string);

        if let Some(message) = affirmation {
            self.transition(FlowPhase::Affirmation);
            return AdvanceStep::Affirming {
                index: self.current_index,
                message,
            };
        }

        self.move_forward()
    }

    /// Ends the affirmation interlude. Called when the affirmation timer fires.
    pub fn complete_affirmation(&mut self) -> AdvanceStep {
        if self.phase != FlowPhase::Affirmation {
            return AdvanceStep::Ignored(IgnoredReason::NotInQuestion(self.state()));
        }
        self.move_forward()
    }

    /// Moves back one question. Returns false (and does nothing) at index 0
    /// or outside `Question`.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.current_index -= 1;
        self.transition(FlowPhase::Question);
        true
    }

    /// `Submitting -> Complete`. Returns false if not submitting.
    pub fn finish_submission(&mut self) -> bool {
        if self.phase != FlowPhase::Submitting {
            return false;
        }
        self.transition(FlowPhase::Complete)
    }

    fn move_forward(&mut self) -> AdvanceStep {
        if self.is_last_question() {
            self.transition(FlowPhase::Submitting);
            AdvanceStep::Submit
        } else {
            self.current_index += 1;
            self.transition(FlowPhase::Question);
            AdvanceStep::Moved(self.current_index)
        }
    }

    fn transition(&mut self, target: FlowPhase) -> bool {
        match self.phase.transition_to(target) {
            Ok(next) => {
                self.phase = next;
                true
            }
            Err(error) => {
                tracing::error!(session_id = %self.id, %error, "rejected flow transition");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<QuestionCatalog> {
        Arc::new(
            QuestionCatalog::new(vec![
                Question::text("a", "First?").with_affirmation("Nice."),
                Question::single_choice("b", "Second?", ["Yes", "No"]),
                Question::text("c", "Third?"),
            ])
            .unwrap(),
        )
    }

    fn session() -> DiagnosticSession {
        DiagnosticSession::new(LeadRef::new("lead-1").unwrap(), catalog())
    }

    #[test]
    fn starts_at_first_question() {
        let s = session();
        assert_eq!(s.state(), FlowState::Question(0));
        assert_eq!(s.current_question().id, "a");
        assert_eq!(s.progress(), Progress { position: 1, total: 3, percent: 33 });
    }

    #[test]
    fn advance_without_answer_is_ignored() {
        let mut s = session();
        assert_eq!(
            s.advance(),
            AdvanceStep::Ignored(IgnoredReason::Unanswered("a".to_string()))
        );
        assert_eq!(s.state(), FlowState::Question(0));
    }

    #[test]
    fn blank_answer_does_not_unlock_advance() {
        let mut s = session();
        s.set_answer("a", "   ").unwrap();
        assert!(!s.can_advance());
        assert!(matches!(s.advance(), AdvanceStep::Ignored(_)));
    }

    #[test]
    fn affirmation_question_enters_affirmation() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        assert_eq!(
            s.advance(),
            AdvanceStep::Affirming { index: 0, message: "Nice.".to_string() }
        );
        assert_eq!(s.state(), FlowState::Affirmation(0));
        assert_eq!(s.current_affirmation(), Some("Nice."));
    }

    #[test]
    fn affirmation_blocks_answers_advance_and_retreat() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        s.advance();

        assert_eq!(
            s.set_answer("a", "other"),
            Err(SessionError::InvalidPhase(FlowState::Affirmation(0)))
        );
        assert!(matches!(
            s.advance(),
            AdvanceStep::Ignored(IgnoredReason::NotInQuestion(FlowState::Affirmation(0)))
        ));
        assert!(!s.retreat());
        assert_eq!(s.answers().get("a"), "funding");
    }

    #[test]
    fn completing_affirmation_moves_to_next_question() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        s.advance();
        assert_eq!(s.complete_affirmation(), AdvanceStep::Moved(1));
        assert_eq!(s.state(), FlowState::Question(1));
    }

    #[test]
    fn question_without_affirmation_moves_immediately() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        s.advance();
        s.complete_affirmation();
        s.set_answer("b", "Yes").unwrap();
        assert_eq!(s.advance(), AdvanceStep::Moved(2));
    }

    #[test]
    fn last_question_goes_to_submitting_once() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        s.advance();
        s.complete_affirmation();
        s.set_answer("b", "Yes").unwrap();
        s.advance();
        s.set_answer("c", "launch").unwrap();

        assert_eq!(s.advance(), AdvanceStep::Submit);
        assert_eq!(s.state(), FlowState::Submitting);
        assert!(matches!(s.advance(), AdvanceStep::Ignored(_)));
        assert!(s.finish_submission());
        assert_eq!(s.state(), FlowState::Complete);
        assert!(!s.finish_submission());
        assert!(matches!(s.advance(), AdvanceStep::Ignored(_)));
    }

    #[test]
    fn retreat_at_first_question_is_noop() {
        let mut s = session();
        assert!(!s.retreat());
        assert_eq!(s.state(), FlowState::Question(0));
    }

    #[test]
    fn retreat_keeps_answers() {
        let mut s = session();
        s.set_answer("a", "funding").unwrap();
        s.advance();
        s.complete_affirmation();
        s.set_answer("b", "No").unwrap();
        assert!(s.retreat());
        assert_eq!(s.state(), FlowState::Question(0));
        assert_eq!(s.answers().get("a"), "funding");
        assert_eq!(s.answers().get("b"), "No");
    }

    #[test]
    fn unknown_question_id_is_rejected() {
        let mut s = session();
        assert_eq!(
            s.set_answer("zzz", "x"),
            Err(SessionError::UnknownQuestion("zzz".to_string()))
        );
        assert!(s.answers().is_empty());
    }

    #[test]
    fn complete_affirmation_outside_affirmation_is_ignored() {
        let mut s = session();
        assert!(matches!(s.complete_affirmation(), AdvanceStep::Ignored(_)));
    }
}
