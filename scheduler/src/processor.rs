//! Submission processing state machine
//!
//! Drives one `processing` submission to a terminal state: perform the
//! timeout-bounded filing action, record the outcome, and send the
//! completion notification. A filing timeout is treated identically to a
//! filing failure. Both terminal states stick; a failed submission needs
//! manual intervention.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::{Itinerary, Submission, SubmissionStatus};
use tracing::{info, warn};

use crate::error::{SchedulerError, SchedulerResult};
use crate::notify::{NotificationEvent, Notifier};
use crate::traits::{FilingClient, FilingReceipt, NotificationGateway, StateStore, UserDirectory};

/// Terminal outcome of processing one (itinerary, submission) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    Completed,
    Failed,
}

/// Executes the filing action and records its outcome on the submission
pub struct SubmissionProcessor<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    store: Arc<S>,
    filing: Arc<F>,
    notifier: Notifier<S, D, G>,
    filing_timeout: Duration,
}

impl<S, D, G, F> SubmissionProcessor<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, filing: Arc<F>, notifier: Notifier<S, D, G>, filing_timeout: Duration) -> Self {
        Self {
            store,
            filing,
            notifier,
            filing_timeout,
        }
    }

    /// Drive a `processing` submission to `completed` or `failed`
    ///
    /// Store and transition errors propagate to the dispatcher, which
    /// records them per pair; filing errors are absorbed here into the
    /// `failed` terminal state.
    pub async fn process(
        &self,
        itinerary: &Itinerary,
        submission: &mut Submission,
        now: DateTime<Utc>,
    ) -> SchedulerResult<PairOutcome> {
        info!(
            "⚙️ Processing submission {} for itinerary {}",
            submission.id, itinerary.id
        );

        match self.file_with_timeout(itinerary).await {
            Ok(receipt) => self.record_success(itinerary, submission, receipt, now).await,
            Err(err) => self.record_failure(itinerary, submission, err).await,
        }
    }

    async fn file_with_timeout(&self, itinerary: &Itinerary) -> SchedulerResult<FilingReceipt> {
        match tokio::time::timeout(self.filing_timeout, self.filing.submit(itinerary)).await {
            Ok(result) => result,
            Err(_) => Err(SchedulerError::FilingTimeout {
                seconds: self.filing_timeout.as_secs(),
            }),
        }
    }

    async fn record_success(
        &self,
        itinerary: &Itinerary,
        submission: &mut Submission,
        receipt: FilingReceipt,
        now: DateTime<Utc>,
    ) -> SchedulerResult<PairOutcome> {
        submission.transition_status(SubmissionStatus::Completed)?;
        submission.confirmation_number = Some(receipt.confirmation_token);
        submission.submission_date = Some(now);
        submission.notes = Some("Submission processed successfully".to_string());
        self.store.update_submission(submission).await?;

        info!(
            "✅ Submission {} completed with confirmation {}",
            submission.id,
            submission.confirmation_number.as_deref().unwrap_or("unavailable")
        );

        // A delivery failure leaves the completed filing untouched; the
        // unset flag keeps the send retryable on a later pass.
        if let Err(err) = self
            .notifier
            .send_event(NotificationEvent::Completion, itinerary, submission)
            .await
        {
            warn!(
                "⚠️ Completion notification for submission {} not delivered: {}",
                submission.id, err
            );
        }

        Ok(PairOutcome::Completed)
    }

    async fn record_failure(
        &self,
        itinerary: &Itinerary,
        submission: &mut Submission,
        err: SchedulerError,
    ) -> SchedulerResult<PairOutcome> {
        submission.transition_status(SubmissionStatus::Failed)?;
        submission.notes = Some(format!("Error processing submission: {err}"));
        self.store.update_submission(submission).await?;

        // The itinerary stays at `submitted`: a failed filing is surfaced
        // on the submission record only, and nothing retries it.
        warn!(
            "❌ Submission {} for itinerary {} failed: {}",
            submission.id, itinerary.id, err
        );

        Ok(PairOutcome::Failed)
    }
}
