//! Flow phases of a diagnostic session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The phase of a diagnostic session.
///
/// ```text
/// Question ──► Question      (next question, or back one)
/// Question ──► Affirmation   (answered question defines an affirmation)
/// Question ──► Submitting    (last question, no affirmation)
/// Affirmation ──► Question   (timer fired, more questions)
/// Affirmation ──► Submitting (timer fired on last question)
/// Submitting ──► Complete    (always, success or failure)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    Question,
    Affirmation,
    Submitting,
    Complete,
}

impl Default for FlowPhase {
    fn default() -> Self {
        Self::Question
    }
}

impl StateMachine for FlowPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowPhase::*;
        matches!(
            (self, target),
            (Question, Question)
                | (Question, Affirmation)
                | (Question, Submitting)
                | (Affirmation, Question)
                | (Affirmation, Submitting)
                | (Submitting, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowPhase::*;
        match self {
            Question => vec![Question, Affirmation, Submitting],
            Affirmation => vec![Question, Submitting],
            Submitting => vec![Complete],
            Complete => vec![],
        }
    }
}

/// Phase together with the question index where one applies.
///
/// This is the externally observable state: `Question(i)`, `Affirmation(i)`,
/// `Submitting`, `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", content = "index", rename_all = "snake_case")]
pub enum FlowState {
    Question(usize),
    Affirmation(usize),
    Submitting,
    Complete,
}

impl FlowState {
    pub fn phase(&self) -> FlowPhase {
        match self {
            FlowState::Question(_) => FlowPhase::Question,
            FlowState::Affirmation(_) => FlowPhase::Affirmation,
            FlowState::Submitting => FlowPhase::Submitting,
            FlowState::Complete => FlowPhase::Complete,
        }
    }

    /// The question index while in `Question` or `Affirmation`.
    pub fn index(&self) -> Option<usize> {
        match self {
            FlowState::Question(i) | FlowState::Affirmation(i) => Some(*i),
            FlowState::Submitting | FlowState::Complete => None,
        }
    }
}
