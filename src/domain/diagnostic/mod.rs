//! Diagnostic session - one lead's traversal of the question catalog.
//!
//! `DiagnosticSession` owns the answers, the current index and the phase, and
//! enforces the traversal rules. Timing and submission live in the
//! application layer's `FlowController`, which is the only thing that
//! mutates a session.

mod answers;
mod errors;
mod phase;
mod session;

pub use answers::AnswerStore;
pub use errors::SessionError;
pub use phase::{FlowPhase, FlowState};
pub use session::{AdvanceStep, DiagnosticSession, IgnoredReason, Progress};
