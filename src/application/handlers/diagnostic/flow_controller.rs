//! FlowController - drives one diagnostic session end to end.
//!
//! Wraps the [`DiagnosticSession`] state machine with the two effects it
//! needs: the affirmation timer and the submission protocol.
//!
//! ```text
//! Question(i) --advance--> Affirmation(i) --timer--> Question(i+1)
//!      |                        |
//!      +--advance (last)--------+--timer (last)--> Submitting --> Complete
//! ```
//!
//! The timer task performs its transition itself, so the session moves on
//! when the delay elapses even if nobody is awaiting it. The session is
//! therefore shared with that task behind a lock, and accessors return
//! owned snapshots.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::affirmation_timer::{AffirmationTimer, DEFAULT_AFFIRMATION_DELAY};
use super::errors::FlowError;
use super::submission_client::{SubmissionClient, SubmissionOutcome};
use crate::domain::catalog::{Question, QuestionCatalog};
use crate::domain::diagnostic::{
    AdvanceStep, AnswerStore, DiagnosticSession, FlowState, IgnoredReason, Progress,
};
use crate::domain::foundation::SessionId;

/// What happened in response to a flow request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The request was refused; nothing changed.
    Ignored(IgnoredReason),
    /// An affirmation is showing. Call `await_affirmation` to follow it.
    Affirming { index: usize, message: String },
    /// Question `index` is showing.
    Question(usize),
    /// Submission ran and the session is complete.
    Completed(SubmissionOutcome),
}

/// Settings for a flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    pub affirmation_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            affirmation_delay: DEFAULT_AFFIRMATION_DELAY,
        }
    }
}

#[derive(Debug)]
struct FlowShared {
    session: DiagnosticSession,
    outcome: Option<SubmissionOutcome>,
}

type SharedFlow = Arc<Mutex<FlowShared>>;

fn lock(shared: &SharedFlow) -> MutexGuard<'_, FlowShared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owns the session for one lead.
pub struct FlowController {
    shared: SharedFlow,
    submission: SubmissionClient,
    settings: FlowSettings,
    timer: Option<AffirmationTimer<FlowEvent>>,
}

impl FlowController {
    /// Starts a session for the stored lead, at `Question(0)`.
    ///
    /// # Errors
    ///
    /// - `MissingLead` if no lead reference is stored
    /// - `Storage` if the token store cannot be read
    pub async fn start(
        catalog: Arc<QuestionCatalog>,
        submission: SubmissionClient,
        settings: FlowSettings,
    ) -> Result<Self, FlowError> {
        let lead_ref = submission
            .stored_lead_ref()
            .await?
            .ok_or(FlowError::MissingLead)?;

        let session = DiagnosticSession::new(lead_ref, catalog);
        tracing::info!(
            session_id = %session.id(),
            lead_ref = %session.lead_ref(),
            questions = session.catalog().len(),
            "diagnostic session started"
        );

        Ok(Self {
            shared: Arc::new(Mutex::new(FlowShared {
                session,
                outcome: None,
            })),
            submission,
            settings,
            timer: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> SessionId {
        lock(&self.shared).session.id()
    }

    pub fn state(&self) -> FlowState {
        lock(&self.shared).session.state()
    }

    pub fn current_question(&self) -> Question {
        lock(&self.shared).session.current_question().clone()
    }

    pub fn is_last_question(&self) -> bool {
        lock(&self.shared).session.is_last_question()
    }

    /// The affirmation message, while one is showing.
    pub fn current_affirmation(&self) -> Option<String> {
        lock(&self.shared)
            .session
            .current_affirmation()
            .map(str::to_string)
    }

    pub fn answers(&self) -> AnswerStore {
        lock(&self.shared).session.answers().clone()
    }

    pub fn progress(&self) -> Progress {
        lock(&self.shared).session.progress()
    }

    pub fn can_advance(&self) -> bool {
        lock(&self.shared).session.can_advance()
    }

    pub fn can_retreat(&self) -> bool {
        lock(&self.shared).session.can_retreat()
    }

    pub fn is_complete(&self) -> bool {
        self.state() == FlowState::Complete
    }

    /// How submission went, once the session is complete.
    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        lock(&self.shared).outcome.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores an answer for a question. Valid only while a question shows.
    pub fn set_answer(&mut self, id: &str, text: impl Into<String>) -> Result<(), FlowError> {
        lock(&self.shared).session.set_answer(id, text)?;
        Ok(())
    }

    /// Moves forward from the current question.
    ///
    /// Refused (`Ignored`) outside `Question` or while the current answer is
    /// blank. When the question defines an affirmation the timer is armed and
    /// `Affirming` is returned; otherwise the flow moves on at once, running
    /// the submission when leaving the last question.
    pub async fn advance(&mut self) -> FlowEvent {
        let step = lock(&self.shared).session.advance();
        match step {
            AdvanceStep::Affirming { index, message } => {
                tracing::debug!(index, "affirmation started");
                let shared = self.shared.clone();
                let submission = self.submission.clone();
                self.timer = Some(AffirmationTimer::schedule(
                    self.settings.affirmation_delay,
                    async move {
                        let step = lock(&shared).session.complete_affirmation();
                        resolve(&shared, &submission, step).await
                    },
                ));
                FlowEvent::Affirming { index, message }
            }
            step => resolve(&self.shared, &self.submission, step).await,
        }
    }

    /// Waits for the affirmation timer and returns the transition it made.
    ///
    /// Returns `None` when no timer was armed since the last call. If the
    /// timer already fired, returns at once. Cancel-safe: if the returned
    /// future is dropped the timer stays armed and a later call resumes
    /// waiting.
    pub async fn await_affirmation(&mut self) -> Option<FlowEvent> {
        let timer = self.timer.as_mut()?;
        let event = timer.wait().await;
        self.timer = None;

        if event.is_none() {
            tracing::warn!(state = ?self.state(), "affirmation timer cancelled");
        }
        event
    }

    /// Moves back one question. No-op at the first question and outside
    /// `Question`.
    pub fn retreat(&mut self) -> bool {
        let mut shared = lock(&self.shared);
        let moved = shared.session.retreat();
        if moved {
            tracing::debug!(index = shared.session.current_index(), "moved back");
        }
        moved
    }
}

/// Turns a session step into an event, running the submission for `Submit`.
async fn resolve(shared: &SharedFlow, submission: &SubmissionClient, step: AdvanceStep) -> FlowEvent {
    match step {
        AdvanceStep::Ignored(reason) => {
            tracing::debug!(?reason, "advance ignored");
            FlowEvent::Ignored(reason)
        }
        AdvanceStep::Affirming { index, message } => FlowEvent::Affirming { index, message },
        AdvanceStep::Moved(index) => {
            tracing::debug!(index, "question shown");
            FlowEvent::Question(index)
        }
        AdvanceStep::Submit => FlowEvent::Completed(submit(shared, submission).await),
    }
}

/// Runs the submission protocol. Reached exactly once per session, since
/// only the `Question`/`Affirmation` to `Submitting` transition leads here.
async fn submit(shared: &SharedFlow, submission: &SubmissionClient) -> SubmissionOutcome {
    let (session_id, lead_ref, answers) = {
        let guard = lock(shared);
        (
            guard.session.id(),
            guard.session.lead_ref().clone(),
            guard.session.answers().clone(),
        )
    };
    tracing::info!(session_id = %session_id, answers = answers.len(), "submitting answers");

    let outcome = submission.submit_answers(&lead_ref, &answers).await;

    // Complete regardless of outcome.
    let mut guard = lock(shared);
    guard.session.finish_submission();
    guard.outcome = Some(outcome.clone());
    outcome
}
