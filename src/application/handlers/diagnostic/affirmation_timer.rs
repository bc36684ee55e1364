//! AffirmationTimer - one-shot delay that ends an affirmation interlude.

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Default length of an affirmation interlude.
pub const DEFAULT_AFFIRMATION_DELAY: Duration = Duration::from_millis(1500);

/// A scheduled task that runs an action once after a fixed delay.
///
/// The action runs inside the task, so it takes effect whether or not anyone
/// waits for it. The flow never cancels a running timer, but the handle is
/// kept so it can be, and dropping the timer aborts the task.
#[derive(Debug)]
pub struct AffirmationTimer<T = ()> {
    handle: JoinHandle<()>,
    rx: oneshot::Receiver<T>,
    outcome: Option<Option<T>>,
}

impl AffirmationTimer<()> {
    /// Schedules a timer with no action.
    pub fn start(delay: Duration) -> Self {
        Self::schedule(delay, async {})
    }
}

impl<T: Clone + Send + 'static> AffirmationTimer<T> {
    /// Runs `action` after `delay`. Must be called inside a tokio runtime.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action.await);
        });
        Self {
            handle,
            rx,
            outcome: None,
        }
    }

    /// Waits until the action has run and returns its output, or `None` if
    /// the timer was cancelled.
    ///
    /// Cancel-safe: dropping the returned future keeps the timer armed.
    pub async fn wait(&mut self) -> Option<T> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = (&mut self.rx).await.ok();
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Non-blocking check; true once the action has run.
    pub fn has_fired(&mut self) -> bool {
        if self.outcome.is_none() {
            match self.rx.try_recv() {
                Ok(value) => self.outcome = Some(Some(value)),
                Err(oneshot::error::TryRecvError::Closed) => self.outcome = Some(None),
                Err(oneshot::error::TryRecvError::Empty) => {}
            }
        }
        matches!(self.outcome, Some(Some(_)))
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl<T> Drop for AffirmationTimer<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
