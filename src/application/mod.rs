//! Application layer - Handlers that orchestrate the domain through ports.

pub mod handlers;

pub use handlers::{
    // Diagnostic flow
    AffirmationTimer, FlowController, FlowError, FlowEvent, FlowSettings, LeadOutcome,
    ResultsLoader, ResultsView, SubmissionClient, SubmissionOutcome, DEFAULT_AFFIRMATION_DELAY,
    // Delivery
    DeliveryDispatcher, DeliveryError,
    // Admin
    AdminConsole, AdminError,
};
