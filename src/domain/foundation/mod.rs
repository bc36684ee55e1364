//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait and the validation error
//! that form the vocabulary of the diagnostic domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{LeadRef, ResultRef, SessionId};
pub use state_machine::StateMachine;
