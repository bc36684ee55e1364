//! Application handlers.
//!
//! Handlers orchestrate domain operations across ports:
//! - `diagnostic` - lead registration, question flow, submission, results
//! - `delivery` - report download and email
//! - `admin` - operator console

pub mod admin;
pub mod delivery;
pub mod diagnostic;

pub use admin::{AdminConsole, AdminError};
pub use delivery::{DeliveryDispatcher, DeliveryError};
pub use diagnostic::{
    AffirmationTimer, FlowController, FlowError, FlowEvent, FlowSettings, LeadOutcome,
    ResultsLoader, ResultsView, SubmissionClient, SubmissionOutcome, DEFAULT_AFFIRMATION_DELAY,
};
