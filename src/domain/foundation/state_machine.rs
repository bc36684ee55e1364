//! State machine trait for phase enums.
//!
//! Gives the diagnostic flow phases (and any other lifecycle enum) one way
//! to validate and perform transitions.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for FlowPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Question, Affirmation) | (Submitting, Complete))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Submitting => vec![Complete],
///             Complete => vec![],
///             // ... etc
///         }
///     }
/// }
///
/// let next = phase.transition_to(FlowPhase::Complete)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
