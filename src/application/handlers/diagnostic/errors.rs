//! Errors surfaced by the diagnostic flow handlers.

use thiserror::Error;

use crate::domain::diagnostic::{FlowState, SessionError};
use crate::ports::TokenStoreError;

/// Errors from [`FlowController`](super::FlowController).
#[derive(Debug, Error)]
pub enum FlowError {
    /// No lead reference is stored. The caller must send the user back to
    /// lead capture; this is not a recoverable session state.
    #[error("No lead reference stored; lead capture must run first")]
    MissingLead,

    #[error("Operation not allowed in state {0:?}")]
    InvalidPhase(FlowState),

    #[error("Unknown question id: {0}")]
    UnknownQuestion(String),

    #[error("Token storage failed: {0}")]
    Storage(#[from] TokenStoreError),
}

impl From<SessionError> for FlowError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPhase(state) => FlowError::InvalidPhase(state),
            SessionError::UnknownQuestion(id) => FlowError::UnknownQuestion(id),
        }
    }
}
