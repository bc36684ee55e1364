//! Diagnostic flow handlers: lead registration, the question flow, and the
//! results view.

mod affirmation_timer;
mod errors;
mod flow_controller;
mod results_loader;
mod submission_client;

pub use affirmation_timer::{AffirmationTimer, DEFAULT_AFFIRMATION_DELAY};
pub use errors::FlowError;
pub use flow_controller::{FlowController, FlowEvent, FlowSettings};
pub use results_loader::{ResultsLoader, ResultsView};
pub use submission_client::{LeadOutcome, SubmissionClient, SubmissionOutcome};
