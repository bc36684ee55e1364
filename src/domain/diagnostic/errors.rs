//! Session-specific error types.

use thiserror::Error;

use super::FlowState;

/// Errors from operations the session refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation is only valid while a question is on screen.
    #[error("Operation not allowed in state {0:?}")]
    InvalidPhase(FlowState),

    /// The id does not belong to the catalog.
    #[error("Unknown question id: {0}")]
    UnknownQuestion(String),
}
