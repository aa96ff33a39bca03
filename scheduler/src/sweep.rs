//! Due-work discovery and dispatch
//!
//! One sweep queries the store for itineraries whose scheduled filing
//! instant has arrived, gates each on its paid submission, advances the
//! pair into processing, and hands it to the submission processor. Pairs
//! are independent units of work: an error in one is logged, recorded in
//! the report, and never stops the rest of the sweep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{Itinerary, ItineraryId, ItineraryStatus, SubmissionStatus};
use tracing::{error, info, warn};

use crate::error::SchedulerResult;
use crate::notify::{NotificationEvent, Notifier};
use crate::processor::{PairOutcome, SubmissionProcessor};
use crate::traits::{FilingClient, NotificationGateway, StateStore, UserDirectory};

/// One pair's error, surfaced after the sweep instead of aborting it
#[derive(Clone, Debug)]
pub struct SweepError {
    /// Unset when the due query itself failed
    pub itinerary_id: Option<ItineraryId>,
    pub message: String,
}

/// Result of one sweep over the due itineraries
#[derive(Clone, Debug, Default)]
pub struct SweepReport {
    pub due: usize,
    pub completed: usize,
    pub failed: usize,
    pub awaiting_payment: usize,
    pub errors: Vec<SweepError>,
}

impl SweepReport {
    pub fn is_noop(&self) -> bool {
        self.due == 0 && self.errors.is_empty()
    }
}

/// Discovers due itineraries and processes each eligible pair
pub struct SweepRunner<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    store: Arc<S>,
    processor: SubmissionProcessor<S, D, G, F>,
    notifier: Notifier<S, D, G>,
}

impl<S, D, G, F> SweepRunner<S, D, G, F>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
    F: FilingClient + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, processor: SubmissionProcessor<S, D, G, F>, notifier: Notifier<S, D, G>) -> Self {
        Self {
            store,
            processor,
            notifier,
        }
    }

    /// Run one sweep as of `now`
    ///
    /// Usable by the periodic trigger, by manual invocation, and directly
    /// by tests. Never returns an error: every failure is collected into
    /// the report.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        let due = match self.store.find_due_itineraries(ItineraryStatus::Scheduled, now).await {
            Ok(due) => due,
            Err(err) => {
                error!("❌ Due-itinerary query failed: {}", err);
                report.errors.push(SweepError {
                    itinerary_id: None,
                    message: err.to_string(),
                });
                return report;
            }
        };

        report.due = due.len();
        info!("🔍 Found {} itineraries to process", due.len());

        for mut itinerary in due {
            let itinerary_id = itinerary.id;
            match self.process_due_itinerary(&mut itinerary, now).await {
                Ok(Some(PairOutcome::Completed)) => report.completed += 1,
                Ok(Some(PairOutcome::Failed)) => report.failed += 1,
                Ok(None) => report.awaiting_payment += 1,
                Err(err) => {
                    error!("❌ Error processing itinerary {}: {}", itinerary_id, err);
                    report.errors.push(SweepError {
                        itinerary_id: Some(itinerary_id),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            "🏁 Sweep finished: {} due, {} completed, {} failed, {} awaiting payment, {} errors",
            report.due,
            report.completed,
            report.failed,
            report.awaiting_payment,
            report.errors.len()
        );
        report
    }

    /// Advance one due itinerary, or skip it when payment is outstanding
    ///
    /// Returns `Ok(None)` for the no-paid-submission case: the itinerary
    /// stays `scheduled` and the next sweep picks it up again.
    async fn process_due_itinerary(
        &self,
        itinerary: &mut Itinerary,
        now: DateTime<Utc>,
    ) -> SchedulerResult<Option<PairOutcome>> {
        let Some(mut submission) = self.store.find_paid_submission(itinerary.id).await? else {
            info!("⏳ No paid submission found for itinerary {}", itinerary.id);
            return Ok(None);
        };

        // Re-entry after a partial earlier sweep: a submission already in
        // processing is picked up where it left off.
        if submission.status != SubmissionStatus::Processing {
            submission.transition_status(SubmissionStatus::Processing)?;
            self.store.update_submission(&submission).await?;
        }

        itinerary.transition_status(ItineraryStatus::Submitted)?;
        self.store.update_itinerary(itinerary).await?;

        let outcome = self.processor.process(itinerary, &mut submission, now).await?;
        Ok(Some(outcome))
    }

    /// Send the pre-deadline reminder for itineraries whose window has opened
    ///
    /// Same idempotency discipline as every other notification: the
    /// persisted flag makes re-runs free. Returns the number of reminders
    /// actually sent.
    pub async fn run_reminder_pass(&self, now: DateTime<Utc>) -> usize {
        let candidates = match self.store.find_window_open_itineraries(now).await {
            Ok(candidates) => candidates,
            Err(err) => {
                error!("❌ Reminder candidate query failed: {}", err);
                return 0;
            }
        };

        let mut sent = 0;
        for itinerary in candidates {
            match self.remind(&itinerary).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!("⚠️ Reminder for itinerary {} not delivered: {}", itinerary.id, err);
                }
            }
        }

        if sent > 0 {
            info!("📨 Sent {} reminder notifications", sent);
        }
        sent
    }

    async fn remind(&self, itinerary: &Itinerary) -> SchedulerResult<bool> {
        let Some(mut submission) = self.store.find_submission(itinerary.id).await? else {
            return Ok(false);
        };

        self.notifier
            .send_event(NotificationEvent::Reminder, itinerary, &mut submission)
            .await
    }
}
